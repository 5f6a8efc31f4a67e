//! The decorative progress worm.
//!
//! Pure animation state: the head tracks typing progress across a line, the
//! frame counter drives the bouncy head and tail flicker. The UI asks for
//! characters and offsets; it never owns animation state itself.

/// Body segments trailing behind the head.
pub const BODY_LEN: usize = 8;

const HEAD_FRAMES: [char; 4] = ['O', 'o', 'O', '0'];

#[derive(Debug, Clone, Copy, Default)]
pub struct Worm {
    /// Progress across the line in [0, 1].
    pub position: f64,
    pub frame: u64,
}

impl Worm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one animation frame.
    pub fn on_tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Move the head to match typing progress.
    pub fn set_progress(&mut self, typed_len: usize, target_len: usize) {
        self.position = if target_len > 0 {
            typed_len as f64 / target_len as f64
        } else {
            0.0
        };
    }

    pub fn head_char(&self) -> char {
        HEAD_FRAMES[(self.frame % HEAD_FRAMES.len() as u64) as usize]
    }

    /// Column of the head within a line of `width` cells.
    pub fn head_offset(&self, width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let max = (width - 1) as f64;
        (self.position.clamp(0.0, 1.0) * max) as u16
    }

    /// Body character at `distance` segments behind the head; segments
    /// closer to the tail flicker with the frame counter.
    pub fn body_char(&self, distance: usize) -> char {
        match distance {
            0 => self.head_char(),
            1 => 'o',
            2..=3 => '.',
            4..=5 => {
                if self.frame % 2 == 0 {
                    '.'
                } else {
                    ':'
                }
            }
            _ => {
                if self.frame % 3 == 0 {
                    ':'
                } else {
                    '.'
                }
            }
        }
    }

    /// Render the worm into a full line of `width` characters.
    pub fn render_line(&self, width: u16) -> String {
        let width = width as usize;
        let mut line = vec![' '; width];
        if width == 0 {
            return String::new();
        }
        let head = self.head_offset(width as u16) as usize;
        for distance in 0..=BODY_LEN {
            if distance > head {
                break;
            }
            line[head - distance] = self.body_char(distance);
        }
        line.into_iter().collect()
    }
}
