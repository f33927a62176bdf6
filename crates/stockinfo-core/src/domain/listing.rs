//! 상장 종목 테이블.

use serde::{Deserialize, Serialize};

use crate::types::SecurityCode;

/// 종목 테이블의 열 이름 (회사명, 종목코드).
pub const LISTING_COLUMNS: [&str; 2] = ["회사명", "종목코드"];

/// 상장 종목 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    /// 회사명
    pub company_name: String,
    /// 종목코드 (6자리)
    pub security_code: SecurityCode,
}

impl ListingRow {
    pub fn new(company_name: impl Into<String>, security_code: SecurityCode) -> Self {
        Self {
            company_name: company_name.into(),
            security_code,
        }
    }
}

/// 회사명 → 종목코드 테이블.
///
/// 원본 목록의 행 순서를 유지하며 열은 항상 두 개입니다.
/// 요청마다 새로 만들고 저장하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingTable {
    rows: Vec<ListingRow>,
}

impl ListingTable {
    pub fn new(rows: Vec<ListingRow>) -> Self {
        Self { rows }
    }

    /// 열 이름.
    pub fn columns(&self) -> [&'static str; 2] {
        LISTING_COLUMNS
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListingRow> {
        self.rows.iter()
    }

    /// 회사명이 정확히 일치하는 행 (대소문자, 공백 구분).
    pub fn exact_matches<'a>(
        &'a self,
        company_name: &'a str,
    ) -> impl Iterator<Item = &'a ListingRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.company_name == company_name)
    }

    /// 회사명 또는 종목코드에 검색어가 포함된 행 (대소문자 무시).
    pub fn search(&self, query: &str) -> Vec<&ListingRow> {
        let query_upper = query.to_uppercase();
        self.rows
            .iter()
            .filter(|row| {
                row.company_name.to_uppercase().contains(&query_upper)
                    || row.security_code.as_str().contains(&query_upper)
            })
            .collect()
    }
}

impl FromIterator<ListingRow> for ListingTable {
    fn from_iter<I: IntoIterator<Item = ListingRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for ListingTable {
    type Item = ListingRow;
    type IntoIter = std::vec::IntoIter<ListingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListingTable {
    type Item = &'a ListingRow;
    type IntoIter = std::slice::Iter<'a, ListingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
