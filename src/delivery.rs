//! Delivery transport boundary
//!
//! The pipeline emits abstract [`StyledLine`]s; a transport adapter owns the
//! protocol-specific encoding. This binary ships a terminal adapter that
//! writes ANSI truecolor sequences, one message per line, order preserved.

use crate::error::{ChatheadError, ChatheadResult};
use crate::style::{Segment, StyledLine, TextStyle, GLYPH};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Sends rendered lines to a recipient, one message per line, in order
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, lines: &[StyledLine]) -> ChatheadResult<()>;
}

/// Encode one styled line as an ANSI truecolor string.
///
/// Ends with a reset so a line never bleeds styling into the next. The
/// obfuscated flag has no terminal equivalent and is dropped.
pub fn ansi_encode(line: &StyledLine) -> String {
    let mut out = String::new();

    for segment in &line.segments {
        match segment {
            Segment::Glyph(color) => {
                out.push_str(&format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b));
                out.push(GLYPH);
            }
            Segment::Text(spans) => {
                for span in spans {
                    out.push_str(&sgr_sequence(&span.style));
                    out.push_str(&span.text);
                }
            }
        }
    }

    out.push_str("\x1b[0m");
    out
}

fn sgr_sequence(style: &TextStyle) -> String {
    let mut codes = vec!["0".to_string()];
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if style.underlined {
        codes.push("4".to_string());
    }
    if style.strikethrough {
        codes.push("9".to_string());
    }
    if let Some(color) = style.color {
        codes.push(format!("38;2;{};{};{}", color.r, color.g, color.b));
    }
    format!("\x1b[{}m", codes.join(";"))
}

/// Terminal delivery: ANSI-encoded lines on stdout
pub struct TerminalDelivery;

#[async_trait]
impl Delivery for TerminalDelivery {
    async fn deliver(&self, lines: &[StyledLine]) -> ChatheadResult<()> {
        let mut out = tokio::io::stdout();
        for line in lines {
            let encoded = format!("{}\n", ansi_encode(line));
            out.write_all(encoded.as_bytes())
                .await
                .map_err(|e| ChatheadError::Delivery(e.to_string()))?;
        }
        out.flush()
            .await
            .map_err(|e| ChatheadError::Delivery(e.to_string()))?;
        Ok(())
    }
}
