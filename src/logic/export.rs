//! CSV serialization of grouping results.

use crate::models::DrawSession;
use chrono::NaiveDate;

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding and CJK
/// names display correctly.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Serialize the current grouping as a CSV payload.
///
/// Header row is `組別,姓名`, then one row per participant: the 1-based group
/// label (`第N組`) and the name, ordered by group index then in-group order.
/// Quoting follows standard CSV rules (handled by the writer). The payload is
/// returned as bytes; triggering the actual download is the HTTP layer's job.
pub fn export_groups_csv(session: &DrawSession) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::from(UTF8_BOM);
    let mut wtr = csv::Writer::from_writer(&mut buf);
    wtr.write_record(["組別", "姓名"])?;
    for (i, group) in session.groups.iter().enumerate() {
        let label = format!("第{}組", i + 1);
        for p in group {
            wtr.write_record([label.as_str(), p.name.as_str()])?;
        }
    }
    wtr.flush()?;
    drop(wtr);
    Ok(buf)
}

/// Suggested download filename for a grouping export on the given date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("lucky-groups-{}.csv", date.format("%Y-%m-%d"))
}
