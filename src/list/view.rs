use crate::models::{CategoryFilter, ShoppingItem};

/// Items whose name contains `search` (case-insensitive) and whose category
/// passes `filter`, in list order
pub fn filter_items<'a>(
    items: &'a [ShoppingItem],
    search: &str,
    filter: CategoryFilter,
) -> Vec<&'a ShoppingItem> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle) && filter.matches(item.category))
        .collect()
}

/// Sum of prices still to buy
pub fn total_remaining(items: &[ShoppingItem]) -> f64 {
    items
        .iter()
        .filter(|item| !item.purchased)
        .map(|item| item.price)
        .sum()
}
