use std::collections::BTreeMap;

/// Extension fields (`x-...`) captured from the manifest.
///
/// Extra fields land in this map; the validator rejects any key without the `x-` prefix.
pub type Extensions = BTreeMap<String, serde_json::Value>;

pub(crate) fn is_zero(v: &i32) -> bool {
    *v == 0
}
