//! Walks a paginated listing to collect every key matching a filter.

use contracts::shared::pagination::PageData;
use std::future::Future;

/// Requests pages `1, 2, ...` of `page_size` rows until `total` keys are
/// collected or the server returns a short page.
pub async fn collect_all_keys<T, K, E, F, Fut>(
    page_size: usize,
    key_of: impl Fn(&T) -> K,
    mut fetch_page: F,
) -> Result<Vec<K>, E>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<PageData<T>, E>>,
{
    let mut keys = Vec::new();
    let mut page = 1;
    loop {
        let data = fetch_page(page, page_size).await?;
        let received = data.items.len();
        keys.extend(data.items.iter().map(&key_of));

        if received == 0 || received < page_size || keys.len() >= data.total {
            break;
        }
        page += 1;
    }
    log::debug!("collected {} keys in {} page(s)", keys.len(), page);
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn page_of(all: &[i64], page: usize, size: usize) -> PageData<i64> {
        let start = (page - 1) * size;
        PageData {
            items: all.iter().skip(start).take(size).copied().collect(),
            total: all.len(),
            page,
            page_size: size,
            pages: None,
        }
    }

    #[test]
    fn test_collects_across_pages() {
        let all: Vec<i64> = (1..=7).collect();
        let calls = RefCell::new(Vec::new());
        let keys: Result<Vec<i64>, String> = block_on(collect_all_keys(3, |k: &i64| *k, |page, size| {
            calls.borrow_mut().push(page);
            std::future::ready(Ok(page_of(&all, page, size)))
        }));
        assert_eq!(keys.unwrap(), all);
        assert_eq!(*calls.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_stops_on_exact_multiple() {
        let all: Vec<i64> = (1..=6).collect();
        let calls = RefCell::new(0);
        let keys: Result<Vec<i64>, String> = block_on(collect_all_keys(3, |k: &i64| *k, |page, size| {
            *calls.borrow_mut() += 1;
            std::future::ready(Ok(page_of(&all, page, size)))
        }));
        assert_eq!(keys.unwrap().len(), 6);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_empty_listing() {
        let keys: Result<Vec<i64>, String> = block_on(collect_all_keys(500, |k: &i64| *k, |page, size| {
            std::future::ready(Ok(page_of(&[], page, size)))
        }));
        assert!(keys.unwrap().is_empty());
    }

    #[test]
    fn test_error_aborts() {
        let keys: Result<Vec<i64>, String> = block_on(collect_all_keys(2, |k: &i64| *k, |page, size| {
            let all = [1, 2, 3, 4, 5];
            std::future::ready(if page == 2 {
                Err("boom".to_string())
            } else {
                Ok(page_of(&all, page, size))
            })
        }));
        assert_eq!(keys, Err("boom".to_string()));
    }
}
