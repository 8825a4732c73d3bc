//! A1 cell addressing and formula text
//!
//! Rows and columns are zero-based everywhere in this crate; conversion to
//! the 1-based A1 notation happens only here.

/// Empty checkbox
pub const UNCHECKED: &str = "☐";
/// Ticked checkbox
pub const CHECKED: &str = "☑";
/// Values offered by checkbox dropdowns
pub const CHECKBOX_CHOICES: [&str; 2] = [UNCHECKED, CHECKED];

/// Convert column number to Excel letter (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Relative reference, e.g. `(11, 2)` -> `C12`
pub fn cell_ref(row: u32, col: u16) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Relative range, e.g. `C12:C15`
pub fn range_ref(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> String {
    format!(
        "{}:{}",
        cell_ref(first_row, first_col),
        cell_ref(last_row, last_col)
    )
}

/// Sheet-qualified absolute range, e.g. `Habits!$C$10:$AG$10`
pub fn absolute_range(
    sheet: &str,
    first_row: u32,
    first_col: u16,
    last_row: u32,
    last_col: u16,
) -> String {
    let sheet = if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        sheet.to_string()
    } else {
        format!("'{}'", sheet.replace('\'', "''"))
    };
    format!(
        "{}!${}${}:${}${}",
        sheet,
        col_to_letter(first_col),
        first_row + 1,
        col_to_letter(last_col),
        last_row + 1
    )
}

/// `=COUNTIF(range,"☑")`
pub fn count_checked(range: &str) -> String {
    format!("=COUNTIF({range},\"{CHECKED}\")")
}

/// `=COUNTIF(range,"☐")`
pub fn count_unchecked(range: &str) -> String {
    format!("=COUNTIF({range},\"{UNCHECKED}\")")
}

/// `=COUNTA(range)`
pub fn count_filled(range: &str) -> String {
    format!("=COUNTA({range})")
}

/// Share of ticked boxes among filled cells; blank when nothing is filled
pub fn completion_ratio(range: &str) -> String {
    format!(
        "=IF(COUNTA({range})=0,\"\",COUNTIF({range},\"{CHECKED}\")/COUNTA({range}))"
    )
}

/// `numerator / denominator`, blank when the denominator is zero
pub fn safe_ratio(numerator: &str, denominator: &str) -> String {
    format!("=IF({denominator}=0,\"\",{numerator}/{denominator})")
}

/// Formula mirroring another cell's value
pub fn link(cell: &str) -> String {
    format!("={cell}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_to_letter_works() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(2), "C");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(32), "AG");
        assert_eq!(col_to_letter(37), "AL");
        assert_eq!(col_to_letter(51), "AZ");
        assert_eq!(col_to_letter(52), "BA");
        assert_eq!(col_to_letter(16383), "XFD");
    }

    #[test]
    fn references() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(11, 2), "C12");
        assert_eq!(range_ref(11, 2, 14, 2), "C12:C15");
        assert_eq!(
            absolute_range("Habits", 9, 2, 9, 31),
            "Habits!$C$10:$AF$10"
        );
        assert_eq!(
            absolute_range("My Habits", 0, 0, 1, 1),
            "'My Habits'!$A$1:$B$2"
        );
    }

    #[test]
    fn checkbox_formulas() {
        assert_eq!(count_checked("C12:C15"), "=COUNTIF(C12:C15,\"☑\")");
        assert_eq!(count_unchecked("C12:C15"), "=COUNTIF(C12:C15,\"☐\")");
        assert_eq!(count_filled("C12:C21"), "=COUNTA(C12:C21)");
    }

    #[test]
    fn ratio_formulas() {
        assert_eq!(
            completion_ratio("C12:C15"),
            "=IF(COUNTA(C12:C15)=0,\"\",COUNTIF(C12:C15,\"☑\")/COUNTA(C12:C15))"
        );
        assert_eq!(safe_ratio("AK9", "AJ9"), "=IF(AJ9=0,\"\",AK9/AJ9)");
        assert_eq!(link("B12"), "=B12");
    }
}
