//! Statement splitting for back ends that accept one statement per request.

/// Split a script into individual statements.
///
/// Semicolons inside `'...'` literals, `"..."` identifiers, `--` and `//`
/// line comments, `/* */` block comments and `$$`/`$tag$` bodies do not end
/// a statement. Comment-only fragments are dropped.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut has_code = false;
    let mut dollar_tag: Option<String> = None;
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);

        if in_line_comment {
            if c == '\n' {
                in_line_comment = false;
            }
            continue;
        }

        if in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_block_comment = false;
            }
            continue;
        }

        if let Some(q) = quote {
            if c == q {
                // Doubled quote is an escaped quote, not the end.
                if chars.peek() == Some(&q) {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                } else {
                    quote = None;
                }
            }
            continue;
        }

        if c == '$' {
            has_code = true;
            let mut tag = String::from("$");
            while let Some(&next) = chars.peek() {
                if next == '$' {
                    tag.push(next);
                    current.push(next);
                    chars.next();
                    break;
                } else if next.is_alphanumeric() || next == '_' {
                    tag.push(next);
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }

            if tag.len() >= 2 && tag.ends_with('$') {
                match &dollar_tag {
                    Some(open) if *open == tag => dollar_tag = None,
                    None => dollar_tag = Some(tag),
                    Some(_) => {}
                }
            }
            continue;
        }

        if dollar_tag.is_some() {
            continue;
        }

        match c {
            '-' if chars.peek() == Some(&'-') => in_line_comment = true,
            '/' if chars.peek() == Some(&'/') => in_line_comment = true,
            '/' if chars.peek() == Some(&'*') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_block_comment = true;
            }
            ';' => {
                if has_code {
                    push_statement(&mut statements, &current);
                }
                current.clear();
                has_code = false;
            }
            '\'' | '"' => {
                quote = Some(c);
                has_code = true;
            }
            c if !c.is_whitespace() => has_code = true,
            _ => {}
        }
    }

    if has_code {
        push_statement(&mut statements, &current);
    }
    statements
}

fn push_statement(statements: &mut Vec<String>, raw: &str) {
    let stmt = raw.trim().trim_end_matches(';').trim();
    statements.push(stmt.to_string());
}
