use super::*;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const HISTORY_PAGE: &str = r#"
<ul>
  <li><a href="/uploads/ranking/Ranking_2026_KW03.xlsx">KW 3</a></li>
  <li><a href="/uploads/ranking/Ranking_2026_KW02.xlsx">KW 2</a></li>
  <li><a href="/uploads/ranking/Ranking_2026_KW02.xlsx">KW 2 (mirror)</a></li>
  <li><a href="/uploads/ranking/Ranking_2025_KW52.xlsx">KW 52</a></li>
</ul>
"#;

fn client_for(server: &MockServer, dir: &TempDir) -> RankingClient {
    RankingClient::with_base_url(server.uri(), dir.path().join("excel"))
}

#[test]
fn test_parse_available_weeks_dedupes_in_page_order() {
    let weeks = parse_available_weeks(HISTORY_PAGE, "http://host");
    let labels: Vec<String> = weeks.iter().map(|w| w.week.label()).collect();
    assert_eq!(labels, vec!["KW 3 2026", "KW 2 2026", "KW 52 2025"]);
    assert!(weeks[0].is_current);
    assert!(weeks[1..].iter().all(|w| !w.is_current));
    assert_eq!(weeks[1].url, "http://host/uploads/ranking/Ranking_2026_KW02.xlsx");
}

#[test]
fn test_parse_available_weeks_empty_page() {
    assert!(parse_available_weeks("<html></html>", "http://host").is_empty());
}

#[test]
fn test_parse_live_week() {
    let html = "<h1>Rangliste   KW 7</h1>";
    assert_eq!(parse_live_week(html, 2026), Some(RankingWeek::new(2026, 7)));
    assert_eq!(parse_live_week("<h1>Rangliste</h1>", 2026), None);
    assert_eq!(parse_live_week("Rangliste KW 99", 2026), None);
}

#[cfg(test)]
mod http_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_available_weeks_with_mock() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ranking/embed/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY_PAGE))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let weeks = client_for(&server, &dir).get_available_weeks().await.unwrap();
        assert_eq!(weeks.len(), 3);
        assert_eq!(
            weeks[0].url,
            format!("{}/uploads/ranking/Ranking_2026_KW03.xlsx", server.uri())
        );
    }

    #[tokio::test]
    async fn test_current_week_prefers_live_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ranking"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Rangliste KW 4"))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let current = client_for(&server, &dir)
            .get_current_week()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.week.week, 4);
        assert!(current.is_current);
        assert!(current.url.ends_with("/ranking/download"));
    }

    #[tokio::test]
    async fn test_current_week_falls_back_to_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ranking"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ranking/embed/history"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HISTORY_PAGE))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let current = client_for(&server, &dir)
            .get_current_week()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.week, RankingWeek::new(2026, 3));
    }

    #[tokio::test]
    async fn test_history_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ranking/embed/history"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let err = client_for(&server, &dir)
            .get_available_weeks()
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_download_week_uses_cache_unless_forced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/uploads/ranking/Ranking_2026_KW02.xlsx"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fresh".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let week = RankingWeek::new(2026, 2);
        let remote = RemoteWeek {
            week,
            url: client.week_url(week),
            is_current: false,
        };

        std::fs::create_dir_all(client.excel_dir()).unwrap();
        std::fs::write(client.excel_path(week), b"cached").unwrap();

        let path = client.download_week(&remote, false).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");

        let path = client.download_week(&remote, true).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
    }

    #[tokio::test]
    async fn test_download_week_empty_body_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/uploads/ranking/Ranking_2026_KW03.xlsx"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let week = RankingWeek::new(2026, 3);
        let remote = RemoteWeek {
            week,
            url: client.week_url(week),
            is_current: false,
        };

        let err = client.download_week(&remote, false).await.unwrap_err();
        assert!(matches!(err, RankingError::NoData { .. }));
        assert!(err.is_transient());
        assert!(!client.is_downloaded(week));
    }

    #[tokio::test]
    async fn test_local_weeks_newest_first() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        assert!(client.get_local_weeks().unwrap().is_empty());

        std::fs::create_dir_all(client.excel_dir()).unwrap();
        for name in [
            "Ranking_2025_KW50.xlsx",
            "Ranking_2026_KW01.xlsx",
            "Ranking_2026_KW01.xlsx.part",
            "notes.txt",
        ] {
            std::fs::write(client.excel_dir().join(name), b"").unwrap();
        }

        let weeks = client.get_local_weeks().unwrap();
        assert_eq!(
            weeks,
            vec![RankingWeek::new(2026, 1), RankingWeek::new(2025, 50)]
        );
    }
}
