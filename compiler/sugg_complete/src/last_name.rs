//! The dotted name at the end of a source line.
//!
//! Used to find the owner of a missing attribute: for `x = foo.bar.baz`
//! the owner of `.qux` is `foo.bar.baz`. Subscripts are kept (`d['k']`),
//! but call results and comprehensions are not re-evaluated.

/// Characters of a dotted name.
fn is_var_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.'
}

/// Scan `line` backward and return the name it ends with.
///
/// Returns `None` when the name ends in a call (`f(x)`) or sits inside a
/// comprehension, since evaluating it again could have side effects. The
/// result may be empty.
pub fn last_name(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let mut stack: Vec<u8> = Vec::new();
    // One past the byte being looked at.
    let mut index = bytes.len();

    while index > 0 {
        let ch = bytes[index - 1];
        let top = stack.last().copied();
        match top {
            Some(quote @ (b'"' | b'\'')) => {
                if ch == quote {
                    stack.pop();
                }
            }
            _ => match ch {
                b'"' | b'\'' => stack.push(ch),
                b']' => stack.push(b'['),
                b'}' => stack.push(b'{'),
                b'[' | b'{' => {
                    if top == Some(ch) {
                        stack.pop();
                    } else {
                        break;
                    }
                }
                b'(' => break,
                b')' => return None,
                _ if index >= 3
                    && &bytes[index - 3..index] == b"for"
                    && matches!(top, None | Some(b'[' | b'{')) =>
                {
                    return None;
                }
                _ if stack.is_empty() && !is_var_name_byte(ch) => break,
                _ => {}
            },
        }
        index -= 1;
    }

    line.get(index..)
}
