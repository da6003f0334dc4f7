use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SneakerDraft;
use crate::query::{self, SortOption};
use crate::store::{InventoryStore, StorageBackend};

/// Searches and orders the collection.
///
/// When a non-blank search finds nothing, the result carries a hint to add a pair
/// with the search term as its model.
pub fn run<B: StorageBackend>(
    store: &InventoryStore<B>,
    term: Option<&str>,
    sort: SortOption,
) -> Result<CmdResult> {
    let term = term.unwrap_or("").trim();
    let listed = query::run(store.snapshot(), term, sort);

    let mut result = CmdResult::default();
    if listed.is_empty() {
        if term.is_empty() {
            result.add_message(CmdMessage::info(
                "Your vault is empty. Add a pair with `solevault add`.",
            ));
        } else {
            let suggestion = SneakerDraft::with_model(term);
            result.add_message(CmdMessage::info(format!(
                "No pairs match \"{}\". Add it with `solevault add --model \"{}\" --brand <BRAND>`.",
                term,
                shell_quoted(&suggestion.model)
            )));
        }
    }
    Ok(result.with_listed_sneakers(listed))
}

// Escapes a value for use inside a double-quoted shell argument.
fn shell_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_everything_newest_first_by_default() {
        let store = StoreFixture::new().with_sneakers(3).build();
        let result = run(&store, None, SortOption::default()).unwrap();
        assert_eq!(result.listed_sneakers.len(), 3);
        assert!(result.messages.is_empty());
        assert!(result
            .listed_sneakers
            .windows(2)
            .all(|w| w[0].added_date >= w[1].added_date));
    }

    #[test]
    fn search_filters_and_sorts() {
        let store = StoreFixture::new()
            .with_sneaker("Nike", "Dunk Low", Some(120.0))
            .with_sneaker("Nike", "Air Max 90", Some(160.0))
            .with_sneaker("Adidas", "Samba", None)
            .build();
        let result = run(&store, Some("nike"), SortOption::PriceHigh).unwrap();
        let models: Vec<_> = result.listed_sneakers.iter().map(|s| s.model.as_str()).collect();
        assert_eq!(models, vec!["Air Max 90", "Dunk Low"]);
    }

    #[test]
    fn empty_search_suggests_adding_term() {
        let store = StoreFixture::new().with_sneaker("Nike", "Dunk Low", None).build();
        let result = run(&store, Some(" yeezy 350 "), SortOption::Newest).unwrap();
        assert!(result.listed_sneakers.is_empty());
        assert!(result.messages[0].content.contains("--model \"yeezy 350\""));
    }

    #[test]
    fn suggested_command_escapes_quotes() {
        let store = StoreFixture::new().build();
        let result = run(&store, Some(r#"the "ten" blazer"#), SortOption::Newest).unwrap();
        assert!(result.messages[0]
            .content
            .contains(r#"--model "the \"ten\" blazer" --brand"#));
    }

    #[test]
    fn empty_vault_has_its_own_hint() {
        let store = StoreFixture::new().build();
        let result = run(&store, None, SortOption::Newest).unwrap();
        assert!(result.messages[0].content.contains("vault is empty"));
    }
}
