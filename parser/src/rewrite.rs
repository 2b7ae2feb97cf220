//! Rewriting table references in classified statements.

use std::collections::HashMap;

use crate::{ClassifiedStatement, TableRole};

impl ClassifiedStatement {
    /// Substitute resolved names for table references.
    ///
    /// Every reference whose name appears in `resolved` is replaced in place,
    /// delimiters included, by the resolved text. References that are missing
    /// from the map are left exactly as written. `CREATE TABLE` prefixes are
    /// never rewritten.
    pub fn rewrite(&self, resolved: &HashMap<String, String>) -> String {
        let mut text = self.text.clone();

        let mut targets: Vec<_> = self
            .refs
            .iter()
            .filter(|r| r.role == TableRole::Reference)
            .filter_map(|r| resolved.get(&r.name).map(|to| (r.span, to)))
            .collect();
        // Replace back to front so earlier spans stay valid.
        targets.sort_by(|a, b| b.0.start.cmp(&a.0.start));

        for (span, to) in targets {
            text.replace_range(span.start..span.end, to);
        }

        text
    }
}
