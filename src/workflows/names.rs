/// Collapses the raw titles of one entry into the name set used for searching.
///
/// Order is kept (the tracking service lists the canonical title first), blank
/// names are discarded and later duplicates are dropped. Search variants are not
/// generated here; the modification rules produce those while resolving so the
/// unmodified names stay a separate, higher priority tier.
pub fn generate_names<I, S>(canonical_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut names: Vec<String> = Vec::new();
    for name in canonical_names {
        let name = name.into();
        if name.trim().is_empty() || names.contains(&name) {
            continue;
        }
        names.push(name);
    }
    names
}
