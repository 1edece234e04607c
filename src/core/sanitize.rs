// src/core/sanitize.rs

/// Decode the handful of entities easySpeak actually emits, plus numeric
/// character references. Anything unrecognized passes through verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return String::from(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail.find(';').filter(|&i| i <= 12);
        match semi {
            Some(end) => {
                let entity = &tail[1..end];
                match entity {
                    "nbsp" => out.push(' '),
                    "amp" => out.push('&'),
                    "lt" => out.push('<'),
                    "gt" => out.push('>'),
                    "quot" => out.push('"'),
                    "apos" => out.push('\''),
                    _ => {
                        if let Some(ch) = numeric_entity(entity) {
                            out.push(ch);
                        } else {
                            out.push_str(&tail[..end + 1]);
                        }
                    }
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Derive the structured-roles lookup key from a role name: drop all
/// whitespace and '&'. Collisions between role spellings are intentional
/// and relied upon by downstream template consumers; do not "fix" them.
pub fn strip_role_key(role: &str) -> String {
    role.chars()
        .filter(|c| !c.is_whitespace() && *c != '&')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_entities() {
        assert_eq!(decode_entities("Tea&nbsp;&amp;&nbsp;Toast"), "Tea & Toast");
        assert_eq!(decode_entities("1 &lt; 2 &#33;"), "1 < 2 !");
        assert_eq!(decode_entities("A &unknown; B"), "A &unknown; B");
        assert_eq!(decode_entities("dangling &"), "dangling &");
    }

    #[test]
    fn role_key_strips_ws_and_ampersand() {
        assert_eq!(strip_role_key("Grammarian & Word of the Day"), "GrammarianWordoftheDay");
        assert_eq!(strip_role_key("Table Topics Evaluator"), "TableTopicsEvaluator");
        assert_eq!(strip_role_key("TableTopicsEvaluator"), "TableTopicsEvaluator");
    }

    #[test]
    fn ws_normalization_collapses_runs() {
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }
}
