//! # Client-side listing helpers
//!
//! The customer and user tables filter, search and paginate entirely in the
//! browser. The rules live here so the views stay thin and the behaviour is
//! testable:
//!
//! - [`search_customers`]: case-insensitive match on name, city, district, address.
//! - [`Regions`]: distinct cities and city/district pairs, in first-seen order,
//!   feeding the filter dropdowns.
//! - [`RegionFilter`]: the selected city/district and the query parameters it
//!   translates to.
//! - [`UserStatus`] / [`StatusFilter`] / [`filter_users`]: admin user list.
//! - [`page`], [`total_pages`], [`visible_pages`]: 1-based pagination with a
//!   window of at most [`MAX_VISIBLE_PAGES`] page buttons.

use chrono::{DateTime, Utc};

use crate::models::{Customer, UserProfile};

/// Label used by every filter dropdown for "no filter".
pub const ALL: &str = "All";

pub const CUSTOMERS_PER_PAGE: usize = 10;
pub const USERS_PER_PAGE: usize = 5;
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Days since verification for a user to still count as active.
pub const ACTIVE_WINDOW_DAYS: f64 = 7.0;

/// Customers whose name, city, district or address contain `term`.
pub fn search_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    let term = term.trim().to_lowercase();
    customers
        .iter()
        .filter(|c| {
            term.is_empty()
                || [&c.name, &c.city, &c.district, &c.address]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}

/// Distinct cities and districts present in a customer list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Regions {
    cities: Vec<String>,
    districts: Vec<(String, String)>,
}

impl Regions {
    pub fn from_customers(customers: &[Customer]) -> Self {
        let mut regions = Self::default();
        for c in customers {
            if !regions.cities.contains(&c.city) {
                regions.cities.push(c.city.clone());
            }
            let pair = (c.city.clone(), c.district.clone());
            if !regions.districts.contains(&pair) {
                regions.districts.push(pair);
            }
        }
        regions
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn has_city(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Districts belonging to `city`. Empty when `city` is "All".
    pub fn districts_in(&self, city: &str) -> Vec<&str> {
        if city == ALL {
            return Vec::new();
        }
        self.districts
            .iter()
            .filter(|(c, _)| c == city)
            .map(|(_, d)| d.as_str())
            .collect()
    }
}

/// Selected city/district. `None` means "All".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionFilter {
    pub city: Option<String>,
    pub district: Option<String>,
}

impl RegionFilter {
    /// Build from dropdown labels, mapping "All" and blanks to `None`.
    pub fn from_labels(city: &str, district: &str) -> Self {
        let pick = |v: &str| (v != ALL && !v.trim().is_empty()).then(|| v.to_string());
        let city = pick(city);
        // A district without a city is meaningless
        let district = city.as_ref().and_then(|_| pick(district));
        Self { city, district }
    }

    pub fn city_label(&self) -> &str {
        self.city.as_deref().unwrap_or(ALL)
    }

    pub fn district_label(&self) -> &str {
        self.district.as_deref().unwrap_or(ALL)
    }

    /// Query for the customer list endpoint: `kota`, plus `kecamatan` when a
    /// district is chosen.
    pub fn list_query(&self) -> Vec<(&'static str, String)> {
        match (&self.city, &self.district) {
            (Some(city), Some(district)) => {
                vec![("kota", city.clone()), ("kecamatan", district.clone())]
            }
            (Some(city), None) => vec![("kota", city.clone())],
            _ => Vec::new(),
        }
    }

    /// Query for the nearby endpoint: the region narrows the search only when
    /// both parts are chosen, otherwise both parameters are sent empty.
    pub fn nearby_query(&self) -> [(&'static str, String); 2] {
        match (&self.city, &self.district) {
            (Some(city), Some(district)) => [("kecamatan", district.clone()), ("kota", city.clone())],
            _ => [("kecamatan", String::new()), ("kota", String::new())],
        }
    }
}

/// Activity status shown in the admin user list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Active when verified no more than seven days ago. Users never verified
    /// are inactive.
    pub fn of(verified_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(verified_at) = verified_at else {
            return UserStatus::Inactive;
        };
        let days = (now - verified_at).num_milliseconds() as f64 / 86_400_000.0;
        if days <= ACTIVE_WINDOW_DAYS {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

/// Status dropdown of the user list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const OPTIONS: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => ALL,
            StatusFilter::Active => "Active",
            StatusFilter::Inactive => "Inactive",
        }
    }

    pub fn from_label(label: &str) -> Self {
        Self::OPTIONS
            .into_iter()
            .find(|f| f.label() == label)
            .unwrap_or_default()
    }

    fn accepts(self, status: UserStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == UserStatus::Active,
            StatusFilter::Inactive => status == UserStatus::Inactive,
        }
    }
}

/// Users matching the status filter whose name or email contains `term`.
pub fn filter_users<'a>(
    users: &'a [UserProfile],
    term: &str,
    status: StatusFilter,
    now: DateTime<Utc>,
) -> Vec<&'a UserProfile> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| status.accepts(UserStatus::of(u.verified_at(), now)))
        .filter(|u| {
            u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Items on 1-based page `current`. Out-of-range pages are empty.
pub fn page<T>(items: &[T], current: usize, per_page: usize) -> &[T] {
    let start = current.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

/// Page numbers to show as buttons: a window of at most
/// [`MAX_VISIBLE_PAGES`] centred on `current`, clamped to `1..=total`.
pub fn visible_pages(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let half = MAX_VISIBLE_PAGES / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = start + MAX_VISIBLE_PAGES - 1;
    if current <= half {
        start = 1;
        end = MAX_VISIBLE_PAGES.min(total);
    }
    if end > total {
        end = total;
        start = (end + 1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerTimestamp;
    use chrono::Duration;

    fn customer(name: &str, city: &str, district: &str) -> Customer {
        Customer {
            name: name.to_string(),
            city: city.to_string(),
            district: district.to_string(),
            address: format!("Jl. {name}"),
            ..Default::default()
        }
    }

    fn user(name: &str, email: &str, verified_days_ago: Option<i64>, now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            email: email.to_string(),
            verified_date: verified_days_ago
                .map(|d| ServerTimestamp::from_datetime(now - Duration::days(d))),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_customers() {
        let customers = vec![
            customer("Budi", "Metro", "Metro Pusat"),
            customer("Sari", "Bandar Lampung", "Kedaton"),
            customer("Andi", "Bandar Lampung", "Rajabasa"),
        ];
        assert_eq!(search_customers(&customers, "").len(), 3);
        assert_eq!(search_customers(&customers, "BANDAR").len(), 2);
        assert_eq!(search_customers(&customers, "kedaton")[0].name, "Sari");
        // Address is searched too
        assert_eq!(search_customers(&customers, "jl. andi")[0].name, "Andi");
        assert!(search_customers(&customers, "surabaya").is_empty());
    }

    #[test]
    fn test_regions() {
        let customers = vec![
            customer("Budi", "Metro", "Metro Pusat"),
            customer("Sari", "Bandar Lampung", "Kedaton"),
            customer("Andi", "Bandar Lampung", "Rajabasa"),
            customer("Rina", "Bandar Lampung", "Kedaton"),
        ];
        let regions = Regions::from_customers(&customers);
        assert_eq!(regions.cities(), ["Metro", "Bandar Lampung"]);
        assert_eq!(regions.districts_in("Bandar Lampung"), ["Kedaton", "Rajabasa"]);
        assert!(regions.districts_in(ALL).is_empty());
        assert!(regions.has_city("Metro"));
        assert!(!regions.has_city("Jakarta"));
    }

    #[test]
    fn test_region_filter_queries() {
        let all = RegionFilter::from_labels(ALL, ALL);
        assert_eq!(all, RegionFilter::default());
        assert!(all.list_query().is_empty());
        assert_eq!(all.nearby_query()[1], ("kota", String::new()));

        let city = RegionFilter::from_labels("Metro", ALL);
        assert_eq!(city.list_query(), vec![("kota", "Metro".to_string())]);
        // City alone does not narrow the nearby search
        assert_eq!(city.nearby_query()[0], ("kecamatan", String::new()));

        let both = RegionFilter::from_labels("Metro", "Metro Pusat");
        assert_eq!(both.list_query().len(), 2);
        assert_eq!(both.nearby_query()[0], ("kecamatan", "Metro Pusat".to_string()));
        assert_eq!(both.district_label(), "Metro Pusat");

        let orphan = RegionFilter::from_labels(ALL, "Kedaton");
        assert!(orphan.district.is_none());
    }

    #[test]
    fn test_user_status() {
        let now = Utc::now();
        assert_eq!(UserStatus::of(Some(now - Duration::days(3)), now), UserStatus::Active);
        assert_eq!(UserStatus::of(Some(now - Duration::days(7)), now), UserStatus::Active);
        assert_eq!(
            UserStatus::of(Some(now - Duration::days(7) - Duration::hours(1)), now),
            UserStatus::Inactive
        );
        assert_eq!(UserStatus::of(None, now), UserStatus::Inactive);
    }

    #[test]
    fn test_filter_users() {
        let now = Utc::now();
        let users = vec![
            user("Sari", "sari@example.com", Some(1), now),
            user("Budi", "budi@example.com", Some(30), now),
            user("Andi", "andi@corp.id", None, now),
        ];
        assert_eq!(filter_users(&users, "", StatusFilter::All, now).len(), 3);
        assert_eq!(filter_users(&users, "", StatusFilter::Active, now)[0].name, "Sari");
        assert_eq!(filter_users(&users, "", StatusFilter::Inactive, now).len(), 2);
        assert_eq!(filter_users(&users, "CORP", StatusFilter::All, now)[0].name, "Andi");
        assert!(filter_users(&users, "budi", StatusFilter::Active, now).is_empty());
        assert_eq!(StatusFilter::from_label("Inactive"), StatusFilter::Inactive);
        assert_eq!(StatusFilter::from_label("bogus"), StatusFilter::All);
    }

    #[test]
    fn test_pagination() {
        let items: Vec<usize> = (1..=23).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(page(&items, 1, 10), &items[0..10]);
        assert_eq!(page(&items, 3, 10), &[21, 22, 23]);
        assert!(page(&items, 4, 10).is_empty());
        // Page 0 is treated as the first page
        assert_eq!(page(&items, 0, 10)[0], 1);
    }

    #[test]
    fn test_visible_pages() {
        assert!(visible_pages(1, 0).is_empty());
        assert_eq!(visible_pages(1, 3), vec![1, 2, 3]);
        assert_eq!(visible_pages(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(visible_pages(9, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(10, 10), vec![6, 7, 8, 9, 10]);
    }
}
