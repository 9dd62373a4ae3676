//! Toolpath text decoder
//!
//! Decodes line by line. The first non-blank, non-comment line is the mode
//! header; every later line is split on whitespace into one-letter words.
//! A word whose number does not parse makes the whole line malformed: the
//! line is skipped and kept as a diagnostic while decoding continues.

use galvokit_core::{CodecError, Command, Opcode, ParamKey, ToolpathMode, Waypoint};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Result of decoding a toolpath
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToolpath {
    pub mode: ToolpathMode,
    pub commands: Vec<Command>,
    /// Recoverable problems, in line order
    pub diagnostics: Vec<CodecError>,
}

impl DecodedToolpath {
    /// Replay the commands into waypoints.
    ///
    /// X and Y are modal (starting at 0) and each motion inherits the current
    /// laser state.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        let (mut x, mut y) = (0.0, 0.0);
        let mut laser_on = false;
        let mut waypoints = Vec::with_capacity(self.commands.len());

        for command in &self.commands {
            match command.opcode {
                Opcode::LaserOn => laser_on = true,
                Opcode::LaserOff => laser_on = false,
                ref op if op.is_motion() => {
                    x = command.param(ParamKey::X).unwrap_or(x);
                    y = command.param(ParamKey::Y).unwrap_or(y);
                    waypoints.push(Waypoint::new(x, y, laser_on));
                }
                _ => {}
            }
        }

        waypoints
    }

    /// True when no line had to be skipped
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Incremental line decoder
///
/// Feed lines in order with [`ToolpathDecoder::feed_line`], then call
/// [`ToolpathDecoder::finish`].
#[derive(Debug, Default)]
pub struct ToolpathDecoder {
    mode: Option<ToolpathMode>,
    commands: Vec<Command>,
    diagnostics: Vec<CodecError>,
    last_motion: Option<Opcode>,
    vector_laser_armed: bool,
}

impl ToolpathDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one line. `line_number` is 1-based.
    ///
    /// Fails only when the header line names an unsupported mode.
    pub fn feed_line(&mut self, line_number: usize, line: &str) -> Result<(), CodecError> {
        let cleaned = remove_comments(line);
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(());
        }

        let Some(mode) = self.mode else {
            let mode =
                ToolpathMode::from_header(cleaned).ok_or_else(|| CodecError::UnsupportedMode {
                    line_number,
                    found: cleaned.to_string(),
                })?;
            tracing::debug!("Toolpath mode '{}' at line {}", mode, line_number);
            self.mode = Some(mode);
            return Ok(());
        };

        match parse_words(line_number, cleaned) {
            Ok(words) => self.push_words(mode, line_number, words),
            Err(err) => {
                tracing::warn!("Skipping line: {}", err);
                self.diagnostics.push(err);
            }
        }
        Ok(())
    }

    fn push_words(&mut self, mode: ToolpathMode, line_number: usize, words: LineWords) {
        let LineWords { opcodes, mut params } = words;
        let power = params.remove(&ParamKey::S);

        let (laser, mut others): (Vec<Opcode>, Vec<Opcode>) =
            opcodes.into_iter().partition(Opcode::is_laser);

        // Bare coordinates repeat the last motion
        if others.is_empty() && !params.is_empty() {
            match &self.last_motion {
                Some(op) => others.push(op.clone()),
                None => {
                    tracing::debug!(
                        "Line {}: coordinates without a motion word ignored",
                        line_number
                    );
                }
            }
        }

        for opcode in laser {
            let mut command = Command::new(opcode).at_line(line_number);
            if let Some(s) = power {
                command = command.with_param(ParamKey::S, s);
            }
            tracing::trace!("{}: {}", line_number, command);
            self.commands.push(command);
        }

        for opcode in others {
            if opcode.is_motion() {
                if mode == ToolpathMode::Vector && !self.vector_laser_armed {
                    self.vector_laser_armed = true;
                    self.commands
                        .push(Command::new(Opcode::LaserOn).at_line(line_number));
                }
                self.last_motion = Some(opcode.clone());
            }

            let command = Command {
                opcode,
                params: params.clone(),
                line_number,
            };
            tracing::trace!("{}: {}", line_number, command);
            self.commands.push(command);
        }
    }

    /// Finish decoding. Fails if no header line was ever seen.
    pub fn finish(self) -> Result<DecodedToolpath, CodecError> {
        let mode = self.mode.ok_or_else(|| CodecError::UnsupportedMode {
            line_number: 0,
            found: "end of input".to_string(),
        })?;

        tracing::debug!(
            "Decoded {} toolpath: {} commands, {} diagnostics",
            mode,
            self.commands.len(),
            self.diagnostics.len()
        );

        Ok(DecodedToolpath {
            mode,
            commands: self.commands,
            diagnostics: self.diagnostics,
        })
    }
}

/// Decode toolpath text
pub fn decode(text: &str) -> Result<DecodedToolpath, CodecError> {
    let mut decoder = ToolpathDecoder::new();
    for (index, line) in text.lines().enumerate() {
        decoder.feed_line(index + 1, line)?;
    }
    decoder.finish()
}

struct LineWords {
    opcodes: Vec<Opcode>,
    params: BTreeMap<ParamKey, f64>,
}

fn parse_words(line_number: usize, line: &str) -> Result<LineWords, CodecError> {
    let malformed = |token: &str| CodecError::MalformedLine {
        line_number,
        token: token.to_string(),
    };

    let mut words = LineWords {
        opcodes: Vec::new(),
        params: BTreeMap::new(),
    };

    for token in line.split_whitespace() {
        let Some(letter) = token.chars().next() else {
            continue;
        };
        match letter.to_ascii_uppercase() {
            'G' | 'M' => {
                let opcode = Opcode::from_word(token).ok_or_else(|| malformed(token))?;
                words.opcodes.push(opcode);
            }
            c => {
                // Unknown letters are dropped without inspecting their value
                let Some(key) = ParamKey::from_char(c) else {
                    continue;
                };
                let value: f64 = token[letter.len_utf8()..]
                    .parse()
                    .map_err(|_| malformed(token))?;
                words.params.insert(key, value);
            }
        }
    }

    Ok(words)
}

/// Strip `( ... )` groups and `;` tails; an unclosed `(` runs to end of line
fn remove_comments(line: &str) -> std::borrow::Cow<'_, str> {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX
        .get_or_init(|| Regex::new(r"\([^)]*(?:\)|$)|;.*").expect("invalid regex pattern"));
    regex.replace_all(line, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_raster_lines() {
        let decoded = decode("raster\nG01 X1.0 Y2.0 M3 S255\nG01 X3.0 Y2.0 M5 S00\n").unwrap();
        assert_eq!(decoded.mode, ToolpathMode::Raster);
        assert!(decoded.is_clean());

        let ops: Vec<&Opcode> = decoded.commands.iter().map(|c| &c.opcode).collect();
        assert_eq!(
            ops,
            vec![
                &Opcode::LaserOn,
                &Opcode::MoveLinear,
                &Opcode::LaserOff,
                &Opcode::MoveLinear
            ]
        );
        assert_eq!(decoded.commands[0].param(ParamKey::S), Some(255.0));
        assert_eq!(decoded.commands[1].param(ParamKey::S), None);
        assert_eq!(decoded.commands[1].line_number, 2);
        assert_eq!(
            decoded.waypoints(),
            vec![Waypoint::on(1.0, 2.0), Waypoint::off(3.0, 2.0)]
        );
    }

    #[test]
    fn test_vector_arms_laser_once() {
        let decoded = decode("VECTOR\nG01 X1 Y1\nG01 X2 Y2\n").unwrap();
        let laser_ons = decoded
            .commands
            .iter()
            .filter(|c| c.opcode == Opcode::LaserOn)
            .count();
        assert_eq!(laser_ons, 1);
        assert_eq!(decoded.commands[0].opcode, Opcode::LaserOn);
        assert!(decoded.waypoints().iter().all(|w| w.laser_on));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "; generated\n\n  raster ; header\nG01 X1 Y1 M3 ; X9\n;G01 X9 Y9\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.waypoints(), vec![Waypoint::on(1.0, 1.0)]);
        assert_eq!(decoded.commands[1].line_number, 4);
    }

    #[test]
    fn test_words_after_inline_comment_are_kept() {
        let decoded = decode("vector\nG01 X1 (note) Y2\nG01(a;b)X3 Y4 (unclosed X9\n").unwrap();
        assert!(decoded.is_clean());
        assert_eq!(
            decoded.waypoints(),
            vec![Waypoint::on(1.0, 2.0), Waypoint::on(3.0, 4.0)]
        );
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let decoded = decode("vector\nG01 X1 Y1\nG01 Xabc Y2\nG01 X3 Y3\n").unwrap();
        assert_eq!(
            decoded.diagnostics,
            vec![CodecError::MalformedLine {
                line_number: 3,
                token: "Xabc".to_string()
            }]
        );
        assert_eq!(
            decoded.waypoints(),
            vec![Waypoint::on(1.0, 1.0), Waypoint::on(3.0, 3.0)]
        );
    }

    #[test]
    fn test_unknown_letters_dropped() {
        let decoded = decode("vector\nG01 X1 Y2 Q7 Pfoo\n").unwrap();
        assert!(decoded.is_clean());
        let motion = &decoded.commands[1];
        assert_eq!(motion.params.len(), 2);
    }

    #[test]
    fn test_bare_coordinates_repeat_motion() {
        let decoded = decode("vector\nX5 Y5\nG01 X1 Y1\nX2\n").unwrap();
        assert_eq!(
            decoded.waypoints(),
            vec![Waypoint::on(1.0, 1.0), Waypoint::on(2.0, 1.0)]
        );
    }

    #[test]
    fn test_unsupported_mode() {
        let err = decode("\n; comment\nspiral\nG01 X0 Y0\n").unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedMode {
                line_number: 3,
                found: "spiral".to_string()
            }
        );

        let err = decode("  \n").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedMode { line_number: 0, .. }));
    }
}
