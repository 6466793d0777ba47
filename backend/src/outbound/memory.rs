//! In-memory sock store.
//!
//! Backs the service when no database is configured and gives tests a real
//! repository with the same filtering, ordering and paging rules as the
//! Diesel adapter.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{SockRepository, SockRepositoryError};
use crate::domain::{ListQuery, Sock, TagFilter};

/// Immutable sock collection shared across clones.
#[derive(Debug, Clone)]
pub struct InMemorySockRepository {
    socks: Arc<[Sock]>,
}

impl InMemorySockRepository {
    pub fn new(socks: impl IntoIterator<Item = Sock>) -> Self {
        Self {
            socks: socks.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.socks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.socks.is_empty()
    }

    fn matching<'a>(&'a self, tags: &'a TagFilter) -> impl Iterator<Item = &'a Sock> + 'a {
        self.socks.iter().filter(move |sock| tags.matches(sock))
    }
}

/// Demo catalogue served when no database is configured.
impl Default for InMemorySockRepository {
    fn default() -> Self {
        Self::new(demo_catalogue())
    }
}

#[async_trait]
impl SockRepository for InMemorySockRepository {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Sock>, SockRepositoryError> {
        let mut socks: Vec<Sock> = self.matching(&query.tags).cloned().collect();
        socks.sort_by(|left, right| query.order.compare(left, right));
        Ok(query.page.slice(socks))
    }

    async fn count(&self, tags: &TagFilter) -> Result<usize, SockRepositoryError> {
        Ok(self.matching(tags).count())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Sock>, SockRepositoryError> {
        Ok(self.socks.iter().find(|sock| sock.id == id).cloned())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, SockRepositoryError> {
        let tags: BTreeSet<&str> = self
            .socks
            .iter()
            .flat_map(|sock| sock.tags.iter().map(String::as_str))
            .collect();
        Ok(tags.into_iter().map(str::to_owned).collect())
    }

    async fn ping(&self) -> Result<(), SockRepositoryError> {
        Ok(())
    }
}

fn demo_sock(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    price: f32,
    count: i32,
    tags: &[&str],
) -> Sock {
    Sock {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        image_url: vec![
            format!("/catalogue/images/{image}_1.jpeg"),
            format!("/catalogue/images/{image}_2.jpeg"),
        ],
        price,
        count,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
    }
}

fn demo_catalogue() -> Vec<Sock> {
    vec![
        demo_sock(
            "03fef6ac-1896-4ce8-bd69-b798f85c6e0b",
            "Holy",
            "Socks fit for a Messiah. You too can experience walking in water with these special edition beauties.",
            "holy",
            99.99,
            1,
            &["magic", "action"],
        ),
        demo_sock(
            "3395a43e-2d88-40de-b95f-e00e1502085b",
            "Colourful",
            "proident occaecat irure et excepteur labore minim nisi amet irure",
            "colourful_socks",
            18.0,
            438,
            &["brown", "blue"],
        ),
        demo_sock(
            "510a0d7e-8e83-4193-b483-e27e09ddc34d",
            "SuperSport XL",
            "Ready for action. Engineers: be ready to smash that next bug!",
            "puma",
            15.0,
            820,
            &["sport", "formal", "black"],
        ),
        demo_sock(
            "808a2de1-1aaa-4c25-a9b9-6612e8f29a38",
            "Crossed",
            "A mature sock, crossed, with an air of nonchalance.",
            "cross",
            17.32,
            738,
            &["blue", "action", "red", "formal"],
        ),
        demo_sock(
            "819e1fbf-8b7e-4f6d-811f-693534916a8b",
            "Figueroa",
            "enim officia aliqua excepteur esse deserunt quis aliquip nostrud anim",
            "WAT",
            14.0,
            808,
            &["formal", "blue", "green"],
        ),
        demo_sock(
            "837ab141-399e-4c1f-9abc-bace40296bac",
            "Cat socks",
            "consequat amet cupidatat minim laborum tempor elit ex consequat in",
            "catsocks",
            15.0,
            175,
            &["brown", "formal", "green"],
        ),
        demo_sock(
            "a0a4f044-b040-410d-8ead-4de0446aec7e",
            "Nerd leg",
            "For all those leg lovers out there. A perfect example of a swivel chair trained calf.",
            "bit_of_leg",
            7.99,
            115,
            &["blue", "skin"],
        ),
        demo_sock(
            "d3588630-ad8e-49df-bbd7-3167f7efb246",
            "YouTube.sock",
            "We were not paid to sell this sock. It's just a bit geeky.",
            "youtube",
            10.99,
            801,
            &["geek", "formal"],
        ),
        demo_sock(
            "zzz4f044-b040-410d-8ead-4de0446aec7e",
            "Classic",
            "Keep it simple.",
            "classic",
            12.0,
            127,
            &["brown", "green"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{assorted, red_and_blue};
    use rstest::rstest;

    fn query(tags: &[&str], order: Option<&str>, page_num: i64, page_size: i64) -> ListQuery {
        ListQuery::new(tags, order, page_num, page_size).expect("valid query")
    }

    fn ids(socks: &[Sock]) -> Vec<&str> {
        socks.iter().map(|sock| sock.id.as_str()).collect()
    }

    #[tokio::test]
    async fn list_requires_every_tag() {
        let repo = InMemorySockRepository::new(assorted());
        let socks = repo
            .list(&query(&["blue", "action"], None, 1, 10))
            .await
            .expect("list");
        assert_eq!(ids(&socks), ["a1", "b2"]);
    }

    #[rstest]
    #[case(&[], 8)]
    #[case(&["blue"], 4)]
    #[case(&["blue", "red"], 1)]
    #[case(&["purple"], 0)]
    #[tokio::test]
    async fn count_matches_unpaged_list(#[case] tags: &[&str], #[case] expected: usize) {
        let repo = InMemorySockRepository::new(assorted());
        let count = repo.count(&TagFilter::new(tags)).await.expect("count");
        let listed = repo.list(&query(tags, None, 1, 1000)).await.expect("list");
        assert_eq!(count, expected);
        assert_eq!(listed.len(), expected);
    }

    #[tokio::test]
    async fn price_order_is_stable_across_pages() {
        let repo = InMemorySockRepository::new(assorted());
        let mut prices = Vec::new();
        for page in 1..=3 {
            let socks = repo
                .list(&query(&[], Some("price"), page, 3))
                .await
                .expect("list page");
            assert!(socks.len() <= 3);
            prices.extend(socks.iter().map(|sock| sock.price));
        }
        assert_eq!(prices.len(), 8);
        assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let repo = InMemorySockRepository::new(red_and_blue());
        let socks = repo.list(&query(&[], None, 5, 10)).await.expect("list");
        assert!(socks.is_empty());
    }

    #[tokio::test]
    async fn lookups_and_tags() {
        let repo = InMemorySockRepository::new(red_and_blue());
        assert_eq!(
            repo.find_by_id("2").await.expect("find").map(|sock| sock.id),
            Some("2".to_owned())
        );
        assert!(repo.find_by_id("99").await.expect("find").is_none());
        assert_eq!(
            repo.distinct_tags().await.expect("tags"),
            ["blue", "red", "warm"]
        );
    }

    #[test]
    fn default_repository_is_seeded() {
        let repo = InMemorySockRepository::default();
        assert!(!repo.is_empty());
    }
}
