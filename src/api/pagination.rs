//! Next-token pagination shared by every list operation

use futures::stream::{self, Stream, TryStreamExt};
use std::future::Future;

use crate::error::{DirectoryError, Result};
use crate::models::Page;

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Lazily walk a next-token paginated listing
///
/// `fetch_page` receives `None` for the first page and the previous page's
/// token afterwards. The stream ends after the first page without a token and
/// stops at the first error. Calling `paginate` again starts from scratch.
pub fn paginate<T, F, Fut>(fetch_page: F) -> impl Stream<Item = Result<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    stream::try_unfold(
        (fetch_page, Cursor::Start),
        |(mut fetch_page, cursor)| async move {
            let token = match cursor {
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
                Cursor::Done => return Ok::<_, DirectoryError>(None),
            };

            let page = fetch_page(token).await?;
            let cursor = match page.next_token {
                Some(token) => Cursor::Next(token),
                None => Cursor::Done,
            };
            let items = stream::iter(page.items.into_iter().map(Ok::<T, DirectoryError>));

            Ok(Some((items, (fetch_page, cursor))))
        },
    )
    .try_flatten()
}

/// Drain a paginated listing into a vector, in page order
pub async fn collect_all<T, F, Fut>(fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    paginate(fetch_page).try_collect().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::cell::RefCell;

    fn three_pages(token: Option<String>) -> Result<Page<u32>> {
        Ok(match token.as_deref() {
            None => Page::new(vec![1, 2], Some("t1".to_string())),
            Some("t1") => Page::new(vec![3], Some("t2".to_string())),
            Some("t2") => Page::last(vec![4, 5]),
            Some(other) => panic!("unexpected token {other}"),
        })
    }

    #[tokio::test]
    async fn test_drains_all_pages_in_order() {
        let seen = RefCell::new(Vec::new());

        let items = collect_all(|token| {
            seen.borrow_mut().push(token.clone());
            async move { three_pages(token) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            *seen.borrow(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_is_lazy() {
        let calls = RefCell::new(0);

        let stream = paginate(|token| {
            *calls.borrow_mut() += 1;
            async move { three_pages(token) }
        });
        assert_eq!(*calls.borrow(), 0);

        let first: Vec<_> = stream.take(2).collect().await;
        assert_eq!(first.len(), 2);
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_stops_at_first_error() {
        let calls = RefCell::new(0);

        let result: Result<Vec<u32>> = collect_all(|token| {
            *calls.borrow_mut() += 1;
            async move {
                match token {
                    None => Ok(Page::new(vec![1], Some("t1".to_string()))),
                    Some(_) => Err(DirectoryError::from_code(
                        "test:List",
                        Some("ThrottlingException"),
                        "rate exceeded".to_string(),
                    )),
                }
            }
        })
        .await;

        assert!(result.unwrap_err().is_throttling());
        assert_eq!(*calls.borrow(), 2);
    }

    #[tokio::test]
    async fn test_single_page_without_token() {
        let items = collect_all(|_| async { Ok(Page::<u32>::default()) })
            .await
            .unwrap();
        assert!(items.is_empty());
    }
}
