use chrono::{Datelike, NaiveDate};

use crate::database::models::Employee;

use super::types::Pagination;

/// Whole years between `birth` and `reference`: the year difference, minus
/// one while the reference day-of-year is still before the birth day-of-year.
pub fn age_on(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth.year();
    if reference.ordinal() < birth.ordinal() {
        age -= 1;
    }
    age
}

/// In-process age filter over a full scan. Keeps exact matches, orders them
/// by birthdate (then email) and paginates the result. Records with an
/// unparseable birthdate are skipped.
pub fn filter_by_age(
    employees: Vec<Employee>,
    years: i32,
    reference: NaiveDate,
    page: Pagination,
) -> Vec<Employee> {
    let mut matched: Vec<(NaiveDate, Employee)> = employees
        .into_iter()
        .filter_map(|employee| {
            let birth = employee.birthdate.to_date()?;
            (age_on(birth, reference) == years).then_some((birth, employee))
        })
        .collect();

    matched.sort_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then_with(|| a.email.cmp(&b.email)));

    page.slice(matched.into_iter().map(|(_, employee)| employee).collect())
}
