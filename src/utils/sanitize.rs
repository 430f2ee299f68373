/// Removes every whitespace character, so `"3 * x"` and `"3*x"` lex the same
pub fn sanitize_definition(definition: &str) -> String {
    definition.chars().filter(|c| !c.is_whitespace()).collect()
}
