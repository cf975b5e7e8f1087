use super::error::FilterError;
use super::types::StoreQuery;

/// Selection requested through `GET /employees?criteria=&value=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    All,
    EmailDomain(String),
    Role(String),
    /// Exact age in whole years, computed against a reference date.
    Age(i32),
}

impl Criterion {
    pub fn parse(criteria: Option<&str>, value: Option<&str>) -> Result<Self, FilterError> {
        let value = value.filter(|v| !v.is_empty());

        match criteria.map(str::trim) {
            Some("byEmailDomain") => value
                .map(|v| Criterion::EmailDomain(v.to_string()))
                .ok_or(FilterError::MissingValue("domain")),
            Some("byRole") => value
                .map(|v| Criterion::Role(v.to_string()))
                .ok_or(FilterError::MissingValue("role")),
            Some("byAge") => value
                .and_then(|v| v.parse::<i32>().ok())
                .map(Criterion::Age)
                .ok_or(FilterError::InvalidAge),
            Some(other) => {
                if !other.is_empty() && other != "none" {
                    tracing::debug!("Unknown criteria '{}', listing all employees", other);
                }
                Ok(Criterion::All)
            }
            None => Ok(Criterion::All),
        }
    }

    /// How this criterion is evaluated: pushed to the store as a predicate,
    /// or computed in-process over a full scan.
    pub fn plan(&self) -> QueryPlan {
        match self {
            Criterion::All => QueryPlan::Store(StoreQuery::All),
            Criterion::EmailDomain(domain) => QueryPlan::Store(StoreQuery::EmailDomain(domain.clone())),
            Criterion::Role(role) => QueryPlan::Store(StoreQuery::Role(role.clone())),
            Criterion::Age(years) => QueryPlan::ScanByAge(*years),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    Store(StoreQuery),
    /// Derived field: scan everything, filter and sort in-process, then page.
    ScanByAge(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_none_lists_everything() {
        assert_eq!(Criterion::parse(None, None), Ok(Criterion::All));
        assert_eq!(Criterion::parse(Some("none"), None), Ok(Criterion::All));
        assert_eq!(Criterion::parse(Some(""), Some("x")), Ok(Criterion::All));
        assert_eq!(Criterion::parse(Some("byShoeSize"), Some("9")), Ok(Criterion::All));
    }

    #[test]
    fn domain_and_role_need_a_value() {
        assert_eq!(
            Criterion::parse(Some("byEmailDomain"), None),
            Err(FilterError::MissingValue("domain"))
        );
        assert_eq!(
            Criterion::parse(Some("byRole"), Some("")),
            Err(FilterError::MissingValue("role"))
        );
        assert_eq!(
            Criterion::parse(Some("byRole"), Some(" DevOps")),
            Ok(Criterion::Role(" DevOps".to_string()))
        );
        assert_eq!(
            Criterion::parse(Some("byRole"), Some("DevOps")),
            Ok(Criterion::Role("DevOps".to_string()))
        );
    }

    #[test]
    fn age_must_be_an_integer() {
        assert_eq!(Criterion::parse(Some("byAge"), Some("30")), Ok(Criterion::Age(30)));
        assert_eq!(Criterion::parse(Some("byAge"), Some("thirty")), Err(FilterError::InvalidAge));
        assert_eq!(Criterion::parse(Some("byAge"), None), Err(FilterError::InvalidAge));
    }

    #[test]
    fn only_age_stays_in_process() {
        assert_eq!(Criterion::All.plan(), QueryPlan::Store(StoreQuery::All));
        assert_eq!(
            Criterion::EmailDomain("a.com".into()).plan(),
            QueryPlan::Store(StoreQuery::EmailDomain("a.com".into()))
        );
        assert_eq!(Criterion::Age(30).plan(), QueryPlan::ScanByAge(30));
    }
}
