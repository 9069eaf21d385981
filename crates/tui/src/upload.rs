const PLANNED_REQUIRED_COLUMNS: [&str; 5] =
    ["type", "direction", "amount", "due_date", "counterparty"];

/// Pre-validates a planned-items CSV before any bytes are sent: the header
/// must contain the backend's required column set. Row-level validation
/// stays server-side; the upload report carries per-row errors.
pub fn validate_planned_csv(content: &[u8]) -> Result<(), String> {
    let mut reader = csv::Reader::from_reader(content);
    let headers = reader
        .headers()
        .map_err(|_| "CSV başlık satırı okunamadı.".to_string())?;

    let present: Vec<&str> = headers.iter().map(str::trim).collect();
    let missing: Vec<&str> = PLANNED_REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "CSV şu kolonları içermeli: {}",
            PLANNED_REQUIRED_COLUMNS.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_header() {
        let csv = b"type,direction,amount,due_date,counterparty,reference_no\n\
                    INVOICE,out,1000,2024-01-15,Tedarikci A,FAT-1\n";
        assert!(validate_planned_csv(csv).is_ok());
    }

    #[test]
    fn accepts_reordered_header() {
        let csv = b"counterparty,due_date,amount,direction,type\nX,2024-01-01,1,in,OTHER\n";
        assert!(validate_planned_csv(csv).is_ok());
    }

    #[test]
    fn rejects_missing_columns() {
        let csv = b"type,amount,due_date\nINVOICE,1000,2024-01-15\n";
        let err = validate_planned_csv(csv).unwrap_err();
        assert!(err.starts_with("CSV şu kolonları içermeli"));
    }
}
