use std::fmt::Write;

use crate::listings::types::ListingRecord;

const HEADER: &str = "⚾ TIXPLUS 2026WBC 票務快訊 ⚾\n\n";
const SEPARATOR: &str = "------------------\n";

/// Render matched events into the push message body.
///
/// Fields are interpolated verbatim; the output is plain text and the
/// LINE length limit is not enforced here.
pub fn format_message(records: &[ListingRecord], target_url: &str) -> String {
    let mut content = String::from(HEADER);

    for record in records {
        // Writing into a String cannot fail.
        let _ = write!(
            content,
            "🏟 {}\n📅 賽事日期：: {}\n💰 刊登數: {}\n{}",
            record.name, record.date, record.listing_count, SEPARATOR
        );
    }

    let _ = write!(content, "\n🔗 立即查看:\n{}", target_url);
    content
}
