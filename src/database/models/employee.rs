use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Date of birth as submitted by clients: zero-padded decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Birthdate {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl Birthdate {
    pub fn new(day: impl Into<String>, month: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// Calendar date for this birthdate, if the three parts form one.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let day = self.day.parse::<u32>().ok()?;
        let month = self.month.parse::<u32>().ok()?;
        let year = self.year.parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Stored employee record, including the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub birthdate: Birthdate,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

/// Employee as returned over the API. There is no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub email: String,
    pub name: String,
    pub birthdate: Birthdate,
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl From<Employee> for EmployeeView {
    fn from(employee: Employee) -> Self {
        Self {
            email: employee.email,
            name: employee.name,
            birthdate: employee.birthdate,
            roles: employee.roles,
            manager: employee.manager,
        }
    }
}

/// Body of `PUT /employees/:email/manager`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerEmail {
    pub email: String,
}

/// Flat row layout of the `employees` table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub email: String,
    pub name: String,
    pub password: String,
    pub birth_day: String,
    pub birth_month: String,
    pub birth_year: String,
    pub roles: Vec<String>,
    pub manager: Option<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            email: row.email,
            name: row.name,
            password: row.password,
            birthdate: Birthdate {
                day: row.birth_day,
                month: row.birth_month,
                year: row.birth_year,
            },
            roles: row.roles,
            manager: row.manager,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn view_never_serializes_password() {
        let employee = Employee {
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            password: "Secret1".to_string(),
            birthdate: Birthdate::new("03", "01", "1999"),
            roles: vec!["DevOps".to_string()],
            manager: None,
        };

        let value = serde_json::to_value(EmployeeView::from(employee)).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("manager").is_none());
        assert_eq!(value["birthdate"], json!({"day": "03", "month": "01", "year": "1999"}));
    }

    #[test]
    fn roles_and_manager_default_when_absent() {
        let employee: Employee = serde_json::from_value(json!({
            "email": "a@b.com",
            "name": "A",
            "password": "Pa5",
            "birthdate": {"day": "01", "month": "02", "year": "1990"}
        }))
        .unwrap();
        assert!(employee.roles.is_empty());
        assert!(employee.manager.is_none());
    }

    #[test]
    fn birthdate_to_date_rejects_impossible_days() {
        assert_eq!(
            Birthdate::new("29", "02", "2000").to_date(),
            NaiveDate::from_ymd_opt(2000, 2, 29)
        );
        assert!(Birthdate::new("29", "02", "2001").to_date().is_none());
        assert!(Birthdate::new("xx", "02", "2001").to_date().is_none());
    }
}
