//! Single-pass lexical scanner behind the normalizer.
//!
//! One state variable, one transition table ([`transition`]). The scanner
//! never fails: unterminated comments and literals run to end of input.

/// Inserted between a `/` and a following `/` or `*` that only became
/// adjacent because whitespace or a comment between them was dropped.
/// Keeps the compare form from growing a comment opener on a second pass.
pub(crate) const TOKEN_SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// Nothing but whitespace (or comments) seen since the last newline.
    LineStart,
    Code,
    LineComment,
    /// Remembers whether it opened at line start, so a `#` right after
    /// `/* ... */` is still a leading hash comment.
    BlockComment { from_line_start: bool },
    DoubleQuoted,
    SingleQuoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Drop whitespace everywhere. Used for equality testing.
    Compare,
    /// Keep whitespace and line structure, drop only comments.
    Strip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Nothing,
    /// A code character outside any literal.
    Code(char),
    /// A character inside a string or char literal, quotes included.
    Literal(char),
    /// A backslash escape inside a literal.
    Escape(char),
    /// Whitespace, kept only in `Mode::Strip`.
    Space(char),
}

#[derive(Debug, Clone, Copy)]
struct Step {
    next: State,
    emit: Emit,
    /// Characters consumed: 2 for two-character tokens such as `//` or `\"`.
    consumed: usize,
}

const fn step(next: State, emit: Emit, consumed: usize) -> Step {
    Step {
        next,
        emit,
        consumed,
    }
}

fn transition(state: State, c: char, lookahead: Option<char>, hash_comments: bool) -> Step {
    use State::*;
    match state {
        LineStart | Code => match (c, lookahead) {
            ('/', Some('/')) => step(LineComment, Emit::Nothing, 2),
            ('/', Some('*')) => step(
                BlockComment {
                    from_line_start: state == LineStart,
                },
                Emit::Nothing,
                2,
            ),
            ('#', _) if hash_comments && state == LineStart => {
                step(LineComment, Emit::Nothing, 1)
            }
            ('"', _) => step(DoubleQuoted, Emit::Literal(c), 1),
            ('\'', _) => step(SingleQuoted, Emit::Literal(c), 1),
            ('\n', _) => step(LineStart, Emit::Space(c), 1),
            (c, _) if c.is_whitespace() => step(state, Emit::Space(c), 1),
            (c, _) => step(Code, Emit::Code(c), 1),
        },
        LineComment => match c {
            '\n' => step(LineStart, Emit::Space(c), 1),
            _ => step(LineComment, Emit::Nothing, 1),
        },
        BlockComment { from_line_start } => match (c, lookahead) {
            ('*', Some('/')) => {
                let resume = if from_line_start { LineStart } else { Code };
                step(resume, Emit::Nothing, 2)
            }
            _ => step(state, Emit::Nothing, 1),
        },
        DoubleQuoted | SingleQuoted => {
            let quote = if state == DoubleQuoted { '"' } else { '\'' };
            match (c, lookahead) {
                ('\\', Some(escaped)) => step(state, Emit::Escape(escaped), 2),
                (c, _) if c == quote => step(Code, Emit::Literal(c), 1),
                (c, _) if c.is_whitespace() => step(state, Emit::Space(c), 1),
                (c, _) => step(state, Emit::Literal(c), 1),
            }
        }
    }
}

/// Run the scanner over `src`.
pub(crate) fn scan(src: &str, hash_comments: bool, mode: Mode) -> String {
    let mut out = String::with_capacity(src.len());
    let mut state = State::LineStart;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        let s = transition(state, c, chars.peek().copied(), hash_comments);
        if s.consumed == 2 {
            chars.next();
        }
        push(&mut out, s.emit, mode);
        state = s.next;
    }
    out
}

fn push(out: &mut String, emit: Emit, mode: Mode) {
    match (emit, mode) {
        (Emit::Nothing, _) => {}
        (Emit::Space(c), Mode::Strip) => out.push(c),
        (Emit::Space(_), Mode::Compare) => {}
        (Emit::Code(c), Mode::Compare) if (c == '/' || c == '*') && out.ends_with('/') => {
            out.push(TOKEN_SEPARATOR);
            out.push(c);
        }
        (Emit::Code(c), _) | (Emit::Literal(c), _) => out.push(c),
        // An escaped whitespace character (line continuation included)
        // is dropped with its backslash, otherwise the backslash would
        // escape whatever follows once the whitespace is gone.
        (Emit::Escape(c), Mode::Compare) if c.is_whitespace() => {}
        (Emit::Escape(c), _) => {
            out.push('\\');
            out.push(c);
        }
    }
}
