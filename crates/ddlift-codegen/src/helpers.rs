/// Generate the primitive byte-stream accessors `Select`, `Len` and
/// `Extract` as DDL source. Each definition is followed by a blank line.
pub fn generate_primitive_helpers() -> String {
    let mut out = String::new();

    out.push_str("def Select (N : uint 64) =\n");
    out.push_str("  block\n");
    out.push_str("    let cur = GetStream\n");
    out.push_str("    let a = bytesOfStream cur\n");
    out.push_str("    (Index a N) as uint 64\n\n");

    out.push_str("def Len =\n");
    out.push_str("  block\n");
    out.push_str("    let cur = GetStream\n");
    out.push_str("    let a = bytesOfStream cur\n");
    out.push_str("    length a\n\n");

    out.push_str("def Extract (High : uint 64) (Low : uint 64) (N : uint 64) =\n");
    out.push_str("  block\n");
    out.push_str("    let mask = (1 << (High - Low + 1)) - 1\n");
    out.push_str("    (N >> Low) .&. mask\n\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMITIVES: [&str; 3] = ["Select", "Len", "Extract"];

    #[test]
    fn defines_each_primitive_once() {
        let text = generate_primitive_helpers();
        for name in PRIMITIVES {
            assert_eq!(text.matches(&format!("def {name} ")).count(), 1, "{name}");
        }
    }

    #[test]
    fn blocks_are_blank_line_separated() {
        let text = generate_primitive_helpers();
        assert_eq!(text.split("\n\n").filter(|b| !b.is_empty()).count(), 3);
        assert!(text.ends_with("mask\n\n"));
    }
}
