//! Text render adapter.
//!
//! Writes one frame per [`draw`](RenderAdapter::draw): the current stacks
//! and, when set, the target stacks. Stacks are printed bottom to top in
//! brackets, e.g. `[b a c] [d]`. States that are not blocks-world
//! configurations are printed verbatim.

use std::io::{self, Stdout, Write};

use cairn_core::{RenderAdapter, RenderError, SymbolicState};

use crate::world::stacks;

/// A [`RenderAdapter`] drawing text frames to a writer.
pub struct TextRenderer<W: Write + Send> {
    out: W,
    target: Option<SymbolicState>,
    frame: u64,
    closed: bool,
}

impl TextRenderer<Stdout> {
    /// A renderer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TextRenderer<W> {
    /// A renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            target: None,
            frame: 0,
            closed: false,
        }
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn describe(state: &SymbolicState) -> String {
    match stacks(state.as_str()) {
        Some(towers) => towers
            .iter()
            .map(|t| {
                let names: Vec<String> = t.iter().map(char::to_string).collect();
                format!("[{}]", names.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" "),
        None => state.as_str().to_string(),
    }
}

impl<W: Write + Send> RenderAdapter for TextRenderer<W> {
    fn draw(&mut self, state: &SymbolicState) -> Result<(), RenderError> {
        if self.closed {
            return Err(RenderError::Closed);
        }
        self.frame += 1;
        writeln!(self.out, "-- frame {} --", self.frame)?;
        writeln!(self.out, "current: {}", describe(state))?;
        if let Some(target) = &self.target {
            writeln!(self.out, "target:  {}", describe(target))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn set_target(&mut self, target: &SymbolicState) -> Result<(), RenderError> {
        if self.closed {
            return Err(RenderError::Closed);
        }
        self.target = Some(target.clone());
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn reopen(&mut self) -> Result<(), RenderError> {
        self.closed = false;
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(r: TextRenderer<Vec<u8>>) -> String {
        String::from_utf8(r.into_inner()).unwrap()
    }

    #[test]
    fn draws_current_and_target_stacks() {
        let mut r = TextRenderer::new(Vec::new());
        r.set_target(&"031".into()).unwrap();
        r.draw(&"200".into()).unwrap();
        assert_eq!(r.frames(), 1);
        let text = output(r);
        assert!(text.contains("-- frame 1 --"));
        assert!(text.contains("current: [b a] [c]"));
        assert!(text.contains("target:  [a c b]"));
    }

    #[test]
    fn unparseable_states_print_verbatim() {
        let mut r = TextRenderer::new(Vec::new());
        r.draw(&"opaque-token".into()).unwrap();
        assert!(output(r).contains("current: opaque-token"));
    }

    #[test]
    fn closed_renderer_refuses_until_reopened() {
        let mut r = TextRenderer::new(Vec::new());
        r.close().unwrap();
        assert!(r.is_closed());
        assert_eq!(r.draw(&"00".into()), Err(RenderError::Closed));
        r.reopen().unwrap();
        r.draw(&"00".into()).unwrap();
        assert_eq!(r.frames(), 1);
    }
}
