//! KIND 목록 Resolver HTTP 통합 테스트 (mockito 서버 사용).

use mockito::{Matcher, Server};
use stockinfo_core::{ListingConfig, MarketSelector};
use stockinfo_data::{DataError, KindListingResolver, ListingSource, TickerMapper};

const LISTING_PATH: &str = "/corpgeneral/corpList.do";

fn listing_html(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(
        "<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=EUC-KR\"></head><body><table border=\"1\">\
         <tr><th>회사명</th><th>시장구분</th><th>종목코드</th><th>업종</th><th>상장일</th></tr>",
    );
    for (name, market, code) in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td style=\"mso-number-format:'@';\">{}</td><td>-</td><td>2002-10-29</td></tr>",
            name, market, code
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn resolver_for(server: &Server) -> KindListingResolver {
    let config = ListingConfig {
        base_url: format!("{}{}", server.url(), LISTING_PATH),
        timeout_secs: 5,
        ..Default::default()
    };
    KindListingResolver::new(config).unwrap()
}

fn query(market_type: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("method".into(), "download".into()),
        Matcher::UrlEncoded("marketType".into(), market_type.into()),
    ])
}

#[tokio::test]
async fn test_resolve_each_market_returns_two_columns() {
    let mut server = Server::new_async().await;

    let cases = [
        (MarketSelector::Unspecified, ""),
        (MarketSelector::Primary, "stockMkt"),
        (MarketSelector::Secondary, "kosdaqMkt"),
    ];

    for (market, market_type) in cases {
        let body = listing_html(&[("NAVER", "유가", "35420"), ("카카오게임즈", "코스닥", "293490")]);
        let (encoded, _, _) = encoding_rs::EUC_KR.encode(&body);

        let mock = server
            .mock("GET", LISTING_PATH)
            .match_query(query(market_type))
            .with_status(200)
            .with_header("content-type", "application/vnd.ms-excel")
            .with_body(encoded.into_owned())
            .create_async()
            .await;

        let table = resolver_for(&server).resolve(market).await.unwrap();

        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].company_name, "NAVER");
        assert_eq!(table.rows()[0].security_code.as_str(), "035420");
        assert_eq!(table.rows()[1].company_name, "카카오게임즈");

        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_server_error_is_data_unavailable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LISTING_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let result = resolver_for(&server).resolve(MarketSelector::Primary).await;
    assert!(matches!(result, Err(DataError::DataUnavailable(_))));
}

#[tokio::test]
async fn test_unexpected_shape_is_data_unavailable() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LISTING_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><body>서비스 점검 중입니다</body></html>")
        .create_async()
        .await;

    let result = resolver_for(&server).resolve(MarketSelector::Secondary).await;
    assert!(matches!(result, Err(DataError::DataUnavailable(_))));
}

#[tokio::test]
async fn test_unreachable_source_is_data_unavailable() {
    let config = ListingConfig {
        base_url: "http://127.0.0.1:9/corpgeneral/corpList.do".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let resolver = KindListingResolver::new(config).unwrap();

    let result = resolver.resolve(MarketSelector::Primary).await;
    assert!(matches!(result, Err(DataError::DataUnavailable(_))));
}

#[tokio::test]
async fn test_mapper_over_http_source() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", LISTING_PATH)
        .match_query(query("kosdaqMkt"))
        .with_status(200)
        .with_body(listing_html(&[("에코프로비엠", "코스닥", "247540")]))
        .expect(2)
        .create_async()
        .await;

    let mapper = TickerMapper::new(resolver_for(&server));

    let ticker = mapper
        .map_to_ticker("에코프로비엠", MarketSelector::Secondary)
        .await
        .unwrap();
    assert_eq!(ticker.to_string(), "247540.KQ");

    let missing = mapper
        .map_to_ticker("에코프로", MarketSelector::Secondary)
        .await;
    assert!(matches!(missing, Err(DataError::NotFound(_))));
}

#[tokio::test]
#[ignore] // 실제 네트워크 테스트는 ignore
async fn test_live_kind_listing() {
    let resolver = KindListingResolver::new(ListingConfig::default()).unwrap();
    let table = resolver.resolve(MarketSelector::Primary).await.unwrap();

    println!("코스피 상장 종목: {}개", table.len());
    assert!(table.exact_matches("NAVER").next().is_some());
}
