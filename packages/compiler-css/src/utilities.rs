//! Mapping from single style declarations to utility classes.
//!
//! Keyword values with a well-known utility become that utility
//! (`display: flex` → `flex`). Lengths and colors become prefixed arbitrary
//! values (`padding: 16px` → `p-[16px]`). Anything else becomes an
//! arbitrary-property class (`cursor: pointer` → `[cursor:pointer]`).

/// (property, value, class)
const KEYWORDS: &[(&str, &str, &str)] = &[
    ("display", "block", "block"),
    ("display", "inline", "inline"),
    ("display", "inline-block", "inline-block"),
    ("display", "flex", "flex"),
    ("display", "inline-flex", "inline-flex"),
    ("display", "grid", "grid"),
    ("display", "none", "hidden"),
    ("flex-direction", "row", "flex-row"),
    ("flex-direction", "row-reverse", "flex-row-reverse"),
    ("flex-direction", "column", "flex-col"),
    ("flex-direction", "column-reverse", "flex-col-reverse"),
    ("flex-wrap", "wrap", "flex-wrap"),
    ("flex-wrap", "nowrap", "flex-nowrap"),
    ("justify-content", "flex-start", "justify-start"),
    ("justify-content", "start", "justify-start"),
    ("justify-content", "center", "justify-center"),
    ("justify-content", "flex-end", "justify-end"),
    ("justify-content", "end", "justify-end"),
    ("justify-content", "space-between", "justify-between"),
    ("justify-content", "space-around", "justify-around"),
    ("justify-content", "space-evenly", "justify-evenly"),
    ("align-items", "flex-start", "items-start"),
    ("align-items", "start", "items-start"),
    ("align-items", "center", "items-center"),
    ("align-items", "flex-end", "items-end"),
    ("align-items", "end", "items-end"),
    ("align-items", "stretch", "items-stretch"),
    ("align-items", "baseline", "items-baseline"),
    ("text-align", "left", "text-left"),
    ("text-align", "center", "text-center"),
    ("text-align", "right", "text-right"),
    ("text-align", "justify", "text-justify"),
    ("position", "static", "static"),
    ("position", "relative", "relative"),
    ("position", "absolute", "absolute"),
    ("position", "fixed", "fixed"),
    ("position", "sticky", "sticky"),
    ("overflow", "hidden", "overflow-hidden"),
    ("overflow", "auto", "overflow-auto"),
    ("overflow", "scroll", "overflow-scroll"),
    ("overflow", "visible", "overflow-visible"),
    ("font-style", "italic", "italic"),
    ("font-style", "normal", "not-italic"),
    ("text-decoration", "underline", "underline"),
    ("text-decoration", "line-through", "line-through"),
    ("text-decoration", "none", "no-underline"),
    ("text-transform", "uppercase", "uppercase"),
    ("text-transform", "lowercase", "lowercase"),
    ("text-transform", "capitalize", "capitalize"),
    ("font-weight", "100", "font-thin"),
    ("font-weight", "200", "font-extralight"),
    ("font-weight", "300", "font-light"),
    ("font-weight", "400", "font-normal"),
    ("font-weight", "normal", "font-normal"),
    ("font-weight", "500", "font-medium"),
    ("font-weight", "600", "font-semibold"),
    ("font-weight", "700", "font-bold"),
    ("font-weight", "bold", "font-bold"),
    ("font-weight", "800", "font-extrabold"),
    ("font-weight", "900", "font-black"),
    ("cursor", "pointer", "cursor-pointer"),
];

/// Properties taking a length, and their utility prefix
const LENGTHS: &[(&str, &str)] = &[
    ("padding", "p"),
    ("padding-top", "pt"),
    ("padding-right", "pr"),
    ("padding-bottom", "pb"),
    ("padding-left", "pl"),
    ("margin", "m"),
    ("margin-top", "mt"),
    ("margin-right", "mr"),
    ("margin-bottom", "mb"),
    ("margin-left", "ml"),
    ("width", "w"),
    ("height", "h"),
    ("min-width", "min-w"),
    ("max-width", "max-w"),
    ("min-height", "min-h"),
    ("max-height", "max-h"),
    ("gap", "gap"),
    ("row-gap", "gap-y"),
    ("column-gap", "gap-x"),
    ("top", "top"),
    ("right", "right"),
    ("bottom", "bottom"),
    ("left", "left"),
    ("font-size", "text"),
    ("line-height", "leading"),
    ("letter-spacing", "tracking"),
    ("border-radius", "rounded"),
    ("border-width", "border"),
    ("z-index", "z"),
    ("opacity", "opacity"),
    ("flex", "flex"),
    ("flex-grow", "grow"),
    ("flex-shrink", "shrink"),
];

/// Properties taking a color, and their utility prefix
const COLORS: &[(&str, &str)] = &[
    ("color", "text"),
    ("background-color", "bg"),
    ("background", "bg"),
    ("border-color", "border"),
];

const NAMED_COLORS: &[(&str, &str)] = &[
    ("white", "white"),
    ("black", "black"),
    ("transparent", "transparent"),
    ("currentcolor", "current"),
    ("inherit", "inherit"),
];

/// Prefixes that accept `-full` for `100%`
const SIZE_PREFIXES: &[&str] = &["w", "h", "min-w", "max-w", "min-h", "max-h"];

/// Utility class for one normalized declaration; `None` for empty values
pub fn utility_class(property: &str, value: &str) -> Option<String> {
    if property.is_empty() || value.is_empty() {
        return None;
    }

    if let Some((_, _, class)) = KEYWORDS
        .iter()
        .find(|(p, v, _)| *p == property && *v == value)
    {
        return Some(class.to_string());
    }

    if let Some((_, prefix)) = LENGTHS.iter().find(|(p, _)| *p == property) {
        return Some(length_class(prefix, value));
    }

    if let Some((_, prefix)) = COLORS.iter().find(|(p, _)| *p == property) {
        let lower = value.to_ascii_lowercase();
        if let Some((_, name)) = NAMED_COLORS.iter().find(|(c, _)| *c == lower) {
            return Some(format!("{}-{}", prefix, name));
        }
        return Some(format!("{}-[{}]", prefix, escape_arbitrary(value)));
    }

    Some(format!(
        "[{}:{}]",
        escape_arbitrary(property),
        escape_arbitrary(value)
    ))
}

fn length_class(prefix: &str, value: &str) -> String {
    match value {
        "0" | "auto" => format!("{}-{}", prefix, value),
        "100%" if SIZE_PREFIXES.contains(&prefix) => format!("{}-full", prefix),
        _ => format!("{}-[{}]", prefix, escape_arbitrary(value)),
    }
}

/// Arbitrary values cannot contain spaces; they are written as underscores
fn escape_arbitrary(value: &str) -> String {
    value.replace(' ', "_")
}
