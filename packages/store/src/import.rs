//! # Bulk customer import from CSV
//!
//! The first row is a header and is skipped. Columns are positional:
//!
//! | # | Column | Field |
//! |---|--------|-------|
//! | 0 | kota | `city` |
//! | 1 | kecamatan | `district` |
//! | 2 | alamat | `address` |
//! | 3 | agreement | `agreement` |
//! | 4 | namaCustomer | `name` |
//! | 5 | merk | `brand` |
//! | 6 | type | `vehicle_type` |
//! | 7 | warna | `color` |
//! | 8 | tahunMobil | `vehicle_year` |
//! | 9 | tenor | `tenor` (integer, anything else becomes `None`) |
//! | 10 | handphone | `phone` |
//! | 11 | namaSales | `sales_name` |
//! | 12 | maxOvd | `max_overdue` |
//! | 13 | tanggalValid | `valid_until` |
//!
//! Short rows are padded with empty cells and rows with no content at all are
//! dropped, which takes care of the trailing blank lines spreadsheets export.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::models::Customer;

/// Number of positional columns an import row carries.
pub const IMPORT_COLUMNS: usize = 14;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("the file contains no customer rows")]
    Empty,
}

/// Parse CSV text into customer records ready for the bulk endpoint.
pub fn parse_customers_csv(text: &str) -> Result<Vec<Customer>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut customers = Vec::new();
    for record in reader.records() {
        let customer = customer_from_record(&record?);
        if !customer.is_blank() {
            customers.push(customer);
        }
    }

    if customers.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(customers)
}

fn customer_from_record(record: &StringRecord) -> Customer {
    let cell = |i: usize| record.get(i).unwrap_or_default().to_string();
    Customer {
        id: None,
        city: cell(0),
        district: cell(1),
        address: cell(2),
        agreement: cell(3),
        name: cell(4),
        brand: cell(5),
        vehicle_type: cell(6),
        color: cell(7),
        vehicle_year: cell(8),
        tenor: parse_tenor(&cell(9)),
        phone: cell(10),
        sales_name: cell(11),
        max_overdue: cell(12),
        valid_until: cell(13),
        lat: None,
        lng: None,
    }
}

/// Leading integer of a tenor cell, so "36 bulan" still reads as 36.
fn parse_tenor(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "kota,kecamatan,alamat,agreement,namaCustomer,merk,type,warna,tahunMobil,tenor,handphone,namaSales,maxOvd,tanggalValid";

    #[test]
    fn test_parse_rows() {
        let csv = format!(
            "{HEADER}\n\
             Metro,Metro Pusat,Jl. Ahmad Yani 3,AGR-001,Budi,Toyota,Avanza,Hitam,2019,36,0812,Rudi,12,2024-12-31\n\
             \"Bandar Lampung\",Kedaton,\"Jl. Teuku Umar, No 5\",AGR-002,Sari,Honda,Jazz,Merah,2020,,0813,Rudi,0,2025-01-31\n"
        );
        let customers = parse_customers_csv(&csv).unwrap();
        assert_eq!(customers.len(), 2);

        let first = &customers[0];
        assert_eq!(first.city, "Metro");
        assert_eq!(first.name, "Budi");
        assert_eq!(first.tenor, Some(36));
        assert_eq!(first.valid_until, "2024-12-31");

        let second = &customers[1];
        assert_eq!(second.address, "Jl. Teuku Umar, No 5");
        assert_eq!(second.tenor, None);
        assert!(second.id.is_none());
    }

    #[test]
    fn test_blank_and_short_rows() {
        let csv = format!("{HEADER}\nMetro,Metro Barat\n,,,,,,,,,,,,,\n\n");
        let customers = parse_customers_csv(&csv).unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].district, "Metro Barat");
        assert_eq!(customers[0].phone, "");
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(parse_customers_csv(HEADER), Err(ImportError::Empty)));
        assert!(matches!(parse_customers_csv(""), Err(ImportError::Empty)));
    }

    #[test]
    fn test_parse_tenor() {
        assert_eq!(parse_tenor("24"), Some(24));
        assert_eq!(parse_tenor("36 bulan"), Some(36));
        assert_eq!(parse_tenor("abc"), None);
        assert_eq!(parse_tenor(""), None);
    }
}
