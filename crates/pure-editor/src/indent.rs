//! Indentation services.
//!
//! An [`IndentService`] recommends how many columns of indentation a new line should get.
//! Commands consult it through an [`IndentContext`], which can pretend that a line break
//! (or a double line break, for brackets being exploded) has already been inserted at some
//! offset, so the service sees the lines as they will look after the edit.
//!
//! Columns are turned back into text with [`indent_string`], based on the state's indent unit.

use crate::state::EditorState;

/// Which half of a line split by a simulated break a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// The text before the break wins when the query position is the break itself.
    Before,
    /// The text after the break wins when the query position is the break itself.
    After,
}

/// A line as seen through an [`IndentContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLine {
    /// Character offset where the (simulated) line starts.
    pub from: usize,
    /// Text of the (simulated) line.
    pub text: String,
}

/// Context handed to an [`IndentService`].
#[derive(Debug, Clone, Copy)]
pub struct IndentContext<'a> {
    state: &'a EditorState,
    simulate_break: Option<usize>,
    simulate_double_break: bool,
}

impl<'a> IndentContext<'a> {
    /// A context over the unmodified document.
    pub fn new(state: &'a EditorState) -> Self {
        Self {
            state,
            simulate_break: None,
            simulate_double_break: false,
        }
    }

    /// A context that pretends a line break was inserted at `at`.
    ///
    /// With `double`, two breaks are simulated and the empty line between them is what
    /// [`IndentContext::line_at`] returns for `at` itself.
    pub fn simulating_break(state: &'a EditorState, at: usize, double: bool) -> Self {
        Self {
            state,
            simulate_break: Some(at),
            simulate_double_break: double,
        }
    }

    /// The state being indented.
    pub fn state(&self) -> &'a EditorState {
        self.state
    }

    /// Offset of the simulated break, if any.
    pub fn simulated_break(&self) -> Option<usize> {
        self.simulate_break
    }

    /// Whether a double break is simulated.
    pub fn simulates_double_break(&self) -> bool {
        self.simulate_double_break
    }

    /// The indent unit of the state.
    pub fn unit(&self) -> &'a str {
        self.state.indent_unit()
    }

    /// Tab size of the state.
    pub fn tab_size(&self) -> usize {
        self.state.tab_size()
    }

    /// Width of one indent unit, in columns.
    pub fn unit_width(&self) -> usize {
        count_column(self.unit(), self.tab_size())
    }

    /// The line at `pos`, taking the simulated break into account.
    pub fn line_at(&self, pos: usize, bias: Bias) -> SimulatedLine {
        let line = self.state.doc().line_at(pos);
        if let Some(at) = self.simulate_break
            && at >= line.from
            && at <= line.to
        {
            if self.simulate_double_break && at == pos {
                return SimulatedLine {
                    from: pos,
                    text: String::new(),
                };
            }
            let split = at - line.from;
            let after_break = match bias {
                Bias::Before => at < pos,
                Bias::After => at <= pos,
            };
            return if after_break {
                SimulatedLine {
                    from: at,
                    text: line.text.chars().skip(split).collect(),
                }
            } else {
                SimulatedLine {
                    from: line.from,
                    text: line.text.chars().take(split).collect(),
                }
            };
        }
        SimulatedLine {
            from: line.from,
            text: line.text,
        }
    }

    /// Indentation, in columns, of the line at `pos`.
    pub fn line_indent(&self, pos: usize, bias: Bias) -> usize {
        let line = self.line_at(pos, bias);
        let leading: String = line.text.chars().take_while(|c| c.is_whitespace()).collect();
        count_column(&leading, self.tab_size())
    }
}

/// Recommends the indentation (in columns) of the line starting at `pos`.
///
/// Returning `None` means "no opinion"; callers fall back to copying the current line's
/// leading whitespace.
pub trait IndentService: Send + Sync {
    /// Indentation for a line starting at `pos`.
    fn indentation(&self, cx: &IndentContext<'_>, pos: usize) -> Option<usize>;
}

impl<F> IndentService for F
where
    F: Fn(&IndentContext<'_>, usize) -> Option<usize> + Send + Sync,
{
    fn indentation(&self, cx: &IndentContext<'_>, pos: usize) -> Option<usize> {
        self(cx, pos)
    }
}

/// Wrap a closure as an [`IndentService`], pinning down its signature.
///
/// Passing a closure through here lets the compiler infer a signature that accepts any
/// context lifetime.
pub fn indent_fn<F>(f: F) -> F
where
    F: Fn(&IndentContext<'_>, usize) -> Option<usize> + Send + Sync,
{
    f
}

/// Never recommends anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndent;

impl IndentService for NoIndent {
    fn indentation(&self, _cx: &IndentContext<'_>, _pos: usize) -> Option<usize> {
        None
    }
}

/// Always recommends the same number of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndent(pub usize);

impl IndentService for FixedIndent {
    fn indentation(&self, _cx: &IndentContext<'_>, _pos: usize) -> Option<usize> {
        Some(self.0)
    }
}

/// Keeps the current line's indentation and adds one unit after an opening bracket.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketIndent;

impl IndentService for BracketIndent {
    fn indentation(&self, cx: &IndentContext<'_>, pos: usize) -> Option<usize> {
        let state = cx.state();
        let line = state.doc().line_at(pos);
        let before: String = line.text.chars().take(pos - line.from).collect();
        let leading: String = before.chars().take_while(|c| c.is_whitespace()).collect();
        let base = count_column(&leading, cx.tab_size());

        let opens = before
            .trim_end()
            .chars()
            .last()
            .is_some_and(|ch| state.brackets().is_open(ch));
        Some(if opens { base + cx.unit_width() } else { base })
    }
}

/// Column width of `text`, expanding tabs to `tab_size` stops.
pub fn count_column(text: &str, tab_size: usize) -> usize {
    text.chars().fold(0, |col, ch| {
        if ch == '\t' && tab_size > 0 {
            col + tab_size - col % tab_size
        } else {
            col + 1
        }
    })
}

/// Build `cols` columns of indentation from `unit`.
///
/// A tab unit fills whole tab stops with tabs and pads with spaces; any other unit repeats
/// its first character.
pub fn indent_string(unit: &str, tab_size: usize, cols: usize) -> String {
    let mut out = String::with_capacity(cols);
    let mut cols = cols;
    let mut ch = unit.chars().next().unwrap_or(' ');
    if ch == '\t' {
        while tab_size > 0 && cols >= tab_size {
            out.push('\t');
            cols -= tab_size;
        }
        ch = ' ';
    }
    out.extend(std::iter::repeat_n(ch, cols));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_column_expands_tabs() {
        assert_eq!(count_column("\t", 4), 4);
        assert_eq!(count_column("  \t", 4), 4);
        assert_eq!(count_column("\u{3000}\u{3000}", 4), 2);
    }

    #[test]
    fn indent_string_uses_unit_character() {
        assert_eq!(indent_string("  ", 4, 6), "      ");
        assert_eq!(indent_string("\u{3000}\u{3000}", 4, 2), "\u{3000}\u{3000}");
        assert_eq!(indent_string("\t", 4, 6), "\t  ");
        assert_eq!(indent_string("", 4, 2), "  ");
    }

    #[test]
    fn simulated_break_splits_the_line() {
        let state = EditorState::new("    foo()");
        let cx = IndentContext::simulating_break(&state, 8, false);
        assert_eq!(cx.line_at(8, Bias::Before).text, "    foo(");
        assert_eq!(cx.line_at(8, Bias::After).text, ")");
        assert_eq!(cx.line_indent(0, Bias::Before), 4);
    }

    #[test]
    fn double_break_exposes_an_empty_middle_line() {
        let state = EditorState::new("    foo()");
        let cx = IndentContext::simulating_break(&state, 8, true);
        assert_eq!(cx.line_at(8, Bias::Before).text, "");
        assert_eq!(cx.line_indent(0, Bias::Before), 4);
    }

    #[test]
    fn bracket_indent_adds_a_unit_after_openers() {
        let state = EditorState::new("    foo(\n    bar").with_indent_unit("  ");
        let cx = IndentContext::new(&state);
        assert_eq!(BracketIndent.indentation(&cx, 8), Some(6));
        assert_eq!(BracketIndent.indentation(&cx, 16), Some(4));
    }

    #[test]
    fn closures_are_services() {
        let state = EditorState::new("x");
        let service = indent_fn(|_, pos| Some(pos * 2));
        assert_eq!(service.indentation(&IndentContext::new(&state), 3), Some(6));
    }
}
