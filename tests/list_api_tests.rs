//! HTTP tests of the filtered, paginated list endpoints

mod common;

use axum::http::StatusCode;
use serde_json::Value;
use std::collections::HashSet;

fn ids(body: &Value) -> Vec<u64> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["id"].as_u64().expect("id should be a number"))
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

mod pagination_tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_first_page_of_ten() {
        let server = common::server();
        let response = server.get("/api/users").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["total"], 25);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(ids(&body), (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_twenty_five_items_in_pages_of_ten() {
        let server = common::server();

        let first: Value = server.get("/api/users?page=1&pageSize=10").await.json();
        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());

        let third: Value = server.get("/api/users?page=3&pageSize=10").await.json();
        assert_eq!(ids(&third), (21..=25).collect::<Vec<_>>());

        let fourth: Value = server.get("/api/users?page=4&pageSize=10").await.json();
        assert!(ids(&fourth).is_empty());
        assert_eq!(fourth["total"], 25);
        assert_eq!(fourth["page"], 4);
    }

    #[tokio::test]
    async fn test_size_alias_and_malformed_values() {
        let server = common::server();

        let body: Value = server.get("/api/users?size=4").await.json();
        assert_eq!(body["pageSize"], 4);
        assert_eq!(ids(&body).len(), 4);

        let body: Value = server.get("/api/users?page=abc&pageSize=-2").await.json();
        assert_eq!(body["page"], 1);
        assert_eq!(body["pageSize"], 10);
    }

    #[tokio::test]
    async fn test_pages_concatenate_to_filtered_set() {
        let server = common::server();
        let filter = "categories=customer,shop";

        let all: Value = server
            .get(&format!("/api/users?{filter}&pageSize=1000"))
            .await
            .json();
        let expected = ids(&all);
        let total = all["total"].as_u64().unwrap() as usize;
        assert_eq!(expected.len(), total);

        let page_size = 4;
        let mut collected = Vec::new();
        for page in 1..=total.div_ceil(page_size) {
            let body: Value = server
                .get(&format!("/api/users?{filter}&page={page}&pageSize={page_size}"))
                .await
                .json();
            assert_eq!(body["total"].as_u64().unwrap() as usize, total);
            assert!(ids(&body).len() <= page_size);
            collected.extend(ids(&body));
        }

        let unique: HashSet<u64> = collected.iter().copied().collect();
        assert_eq!(unique.len(), collected.len(), "pages must not overlap");
        assert_eq!(collected, expected);
    }

    #[tokio::test]
    async fn test_fetch_all_returns_everything() {
        let server = common::server();
        let body: Value = server.get("/api/users?pageSize=1000&page=3").await.json();

        assert_eq!(body["total"], 25);
        assert_eq!(body["pageSize"], 25);
        assert_eq!(ids(&body).len(), 25);
    }

    #[tokio::test]
    async fn test_fetch_all_flag_with_filters() {
        let server = common::server();
        let body: Value = server
            .get("/api/users?fetchAll=true&regions=서울")
            .await
            .json();

        assert_eq!(ids(&body), vec![5, 10, 15, 20, 25]);
        assert_eq!(body["pageSize"], 5);
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let server = common::server();
        let url = "/api/settlements?status=COMPLETED&page=1&pageSize=3";

        let first: Value = server.get(url).await.json();
        let second: Value = server.get(url).await.json();
        assert_eq!(first, second);
    }
}

// =============================================================================
// Filters
// =============================================================================

mod filter_tests {
    use super::*;

    async fn filtered(url: &str) -> (Vec<u64>, u64) {
        let server = common::server();
        let response = server.get(url).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["data"].as_array().unwrap().len() as u64 <= body["pageSize"].as_u64().unwrap());
        (ids(&body), body["total"].as_u64().unwrap())
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (found, total) = filtered("/api/users?search=NICK0&pageSize=50").await;
        assert_eq!(total, 9);
        assert_eq!(found, (1..=9).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_search_matches_any_field() {
        let (found, _) = filtered("/api/users?search=010-1000-0017").await;
        assert_eq!(found, vec![17]);

        let (found, _) = filtered("/api/users?search=판교로").await;
        assert_eq!(found, vec![1, 6, 11, 16, 21]);
    }

    #[tokio::test]
    async fn test_multi_valued_filter_is_or_within_dimension() {
        let (found, total) = filtered("/api/users?regions=서울,부산&pageSize=50").await;
        assert_eq!(total, 10);
        assert_eq!(found, vec![2, 5, 7, 10, 12, 15, 17, 20, 22, 25]);
    }

    #[tokio::test]
    async fn test_dimensions_are_anded() {
        let (found, total) = filtered("/api/users?categories=shop,florist&regions=서울").await;
        assert_eq!(total, 3);
        assert_eq!(found, vec![5, 10, 25]);
    }

    #[tokio::test]
    async fn test_derived_region_fallback() {
        let (found, _) = filtered("/api/users?region=기타").await;
        assert_eq!(found, vec![4, 9, 14, 19, 24]);

        let (found, _) = filtered("/api/users?region=충북").await;
        assert_eq!(found, vec![3, 8, 13, 18, 23]);
    }

    #[tokio::test]
    async fn test_grades_and_join_date_range() {
        let (found, _) = filtered("/api/users?grades=VIP").await;
        assert_eq!(found, vec![4, 9, 14, 19, 24]);

        let (found, total) =
            filtered("/api/users?dateFrom=2024-01-10&dateTo=2024-01-12").await;
        assert_eq!(total, 3);
        assert_eq!(found, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn test_malformed_or_empty_filters_are_ignored() {
        let (_, total) = filtered("/api/users?dateFrom=yesterday&category=&regions=all").await;
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn test_unknown_filter_values_match_nothing() {
        let (found, total) = filtered("/api/users?category=martian").await;
        assert!(found.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_settlement_status_and_type() {
        let (found, _) = filtered("/api/settlements?status=pending").await;
        assert_eq!(found, vec![5, 7]);

        let (found, _) = filtered("/api/settlements?type=FLORIST&dateFrom=2024-02-01&dateTo=2024-02-29").await;
        assert_eq!(found, vec![2, 4, 6, 8]);
    }

    #[tokio::test]
    async fn test_revenue_category_and_nickname() {
        let (found, _) = filtered("/api/revenue-details?category=꽃다발,기타").await;
        assert_eq!(found, vec![3, 4]);

        let (found, _) = filtered("/api/revenue-details?nickname=꽃담").await;
        assert_eq!(found, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_transaction_type_filter() {
        let (found, _) = filtered("/api/transactions?types=PICKUP,REFUND").await;
        assert_eq!(found, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_sort_by_declared_field() {
        let (found, _) = filtered("/api/transactions?sort=amount:desc").await;
        assert_eq!(found, vec![4, 3, 2, 1]);
    }
}

// =============================================================================
// Detail routes
// =============================================================================

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_by_id() {
        let server = common::server();
        let response = server.get("/api/users/7").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["id"], 7);
        assert_eq!(body["nickname"], "nick07");
        assert_eq!(body["joinDate"], "2024-01-07");
    }

    #[tokio::test]
    async fn test_unknown_id_is_404() {
        let server = common::server();
        let response = server.get("/api/settlements/999").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("999"));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_400() {
        let server = common::server();
        let response = server.get("/api/transactions/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_ID");
    }
}
