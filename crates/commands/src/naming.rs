use std::collections::BTreeSet;

/// Outcome of resolving a requested name against the names already in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    /// Create the entity under this name.
    Accepted(String),
    /// The name is taken and renaming is disallowed. Not an error: the
    /// command is skipped silently.
    Conflict,
}

/// Resolve `base` against the names in use for one kind.
///
/// Pure and deterministic: given the same store contents the same name comes
/// out. When renaming is allowed, suffixes `_0, _1, _2, ...` are scanned in
/// increasing order and the smallest free index wins.
pub fn resolve_name(
    base: &str,
    existing: &BTreeSet<String>,
    allow_renaming: bool,
) -> NameResolution {
    if !existing.contains(base) {
        return NameResolution::Accepted(base.to_owned());
    }
    if !allow_renaming {
        return NameResolution::Conflict;
    }
    let mut index: u64 = 0;
    loop {
        let candidate = format!("{base}_{index}");
        if !existing.contains(&candidate) {
            return NameResolution::Accepted(candidate);
        }
        index += 1;
    }
}
