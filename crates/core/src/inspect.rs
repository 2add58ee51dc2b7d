//! Human-readable dump of a sequence.
//!
//! One line per node in visitation order:
//!
//! ```text
//! [0] data="alpha" rand=2
//! [1] data="beta" rand=null
//! ```
//!
//! Cross positions are found by scanning from the head for every node, which
//! is quadratic. This is a debugging aid, not part of the codec.

use std::fmt;

use crate::node::Sequence;

/// `Display` adapter that renders a sequence dump.
pub struct Dump<'a>(pub &'a Sequence);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sequence = self.0;
        for (position, (_, node)) in sequence.iter().enumerate() {
            write!(
                f,
                "[{}] data=\"{}\"",
                position,
                String::from_utf8_lossy(&node.payload)
            )?;
            match node.cross.and_then(|target| sequence.position_of(target)) {
                Some(target) => writeln!(f, " rand={target}")?,
                None => writeln!(f, " rand=null")?,
            }
        }
        Ok(())
    }
}

/// Render the dump into a string.
pub fn render(sequence: &Sequence) -> String {
    Dump(sequence).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build, Record};

    #[test]
    fn test_render() {
        let seq = build(&[
            Record::new("a;b", 1),
            Record::new("self", 1),
            Record::new("none", 9),
        ]);
        assert_eq!(
            render(&seq),
            "[0] data=\"a;b\" rand=1\n[1] data=\"self\" rand=1\n[2] data=\"none\" rand=null\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&Sequence::empty()), "");
    }
}
