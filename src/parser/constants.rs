// Limits for the recursive parser

/// Every level of recursion consumes at least one token, so definitions that
/// pass validation never come close to this.
pub const MAX_PARSE_DEPTH: usize = 1000;
