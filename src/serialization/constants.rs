/// Deepest object/array nesting accepted when reading JSON. Leaves room for
/// a tree at the parser's depth limit wrapped in a test-case file.
pub const MAX_NESTING_DEPTH: usize = 1024;
