/// Normalize a free-form sector label into a calibration key.
///
/// Lowercases, turns spaces into underscores and `&` into `and`, so
/// `"Financial Services"` becomes `financial_services`.
pub fn normalize_sector_key(sector: &str) -> String {
    sector
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('&', "and")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sector_key() {
        assert_eq!(normalize_sector_key("Mining"), "mining");
        assert_eq!(normalize_sector_key("Financial Services"), "financial_services");
        assert_eq!(normalize_sector_key(" ICT "), "ict");
        assert_eq!(normalize_sector_key("Oil & Gas"), "oil_and_gas");
    }
}
