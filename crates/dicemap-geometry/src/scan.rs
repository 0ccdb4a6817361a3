//! Depth-tracking ring extraction for `MULTIPOLYGON` bodies.

/// Splits a multipolygon body into per-ring coordinate text.
///
/// Characters are accumulated only while `depth > 0` and the buffer is
/// emitted each time a `)` brings the depth back to zero. Depth is signed:
/// once the outer `((` has been stripped, the `))` closing each polygon group
/// drives it below zero and the next `((` lifts it back, so commas between
/// groups are never accumulated.
#[derive(Debug, Default)]
pub(crate) struct RingScanner {
    depth: i32,
    buffer: String,
    rings: Vec<String>,
}

impl RingScanner {
    pub(crate) fn scan(body: &str) -> Vec<String> {
        let mut scanner = Self::default();
        for ch in body.chars() {
            scanner.feed(ch);
        }
        scanner.rings
    }

    fn feed(&mut self, ch: char) {
        match ch {
            '(' => self.depth += 1,
            ')' => {
                self.depth -= 1;
                if self.depth == 0 && !self.buffer.is_empty() {
                    self.rings.push(std::mem::take(&mut self.buffer));
                }
            }
            _ if self.depth > 0 => self.buffer.push(ch),
            _ => {}
        }
    }
}
