//! Style normalization - canonical keys and values before class generation

/// Convert a camelCase style key to kebab-case (`backgroundColor` → `background-color`)
pub fn normalize_property(key: &str) -> String {
    let trimmed = key.trim();
    let mut result = String::with_capacity(trimmed.len() + 4);

    for ch in trimmed.chars() {
        if ch.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            result.push(ch.to_ascii_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// Minify a style value
pub fn minify_css_value(value: &str) -> String {
    let trimmed = value.trim();

    // Collapse runs of whitespace
    let mut collapsed = String::with_capacity(trimmed.len());
    let mut last_was_space = false;

    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                collapsed.push(' ');
                last_was_space = true;
            }
        } else {
            collapsed.push(ch);
            last_was_space = false;
        }
    }

    // Per-token rewrites: zero lengths lose their unit, long hex colors shrink
    collapsed
        .split(' ')
        .map(minify_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn minify_token(token: &str) -> String {
    match token {
        "0px" | "0em" | "0rem" | "0%" => "0".to_string(),
        _ => {
            let lower = token.to_ascii_lowercase();
            match lower.as_str() {
                "#ffffff" => "#fff".to_string(),
                "#000000" => "#000".to_string(),
                _ => token.to_string(),
            }
        }
    }
}
