//! Format drawing and verification results for human consumption.

use crate::model;
use crate::record::ResultRecord;
use crate::verify::VerifyReport;

/// Format a finished drawing for stdout.
///
/// Shows the event identity, the timestamp with its epoch-seconds value,
/// the seed, and per packet the ticket tally plus the chosen winner.
pub fn format_report(record: &ResultRecord, epoch: i64) -> String {
    let mut output = String::new();

    output.push_str("═══════════════════════════════════════════════════════════════════════\n");
    output.push_str(&format!("  {}\n", record.title));
    output.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

    output.push_str(&format!("Timestamp: {} ({})\n", record.timestamp, epoch));
    output.push_str(&format!("Seed:      {}\n\n", record.rng_seed));

    for packet in &record.packets {
        let tally = model::tally(&packet.participants);
        let entries: Vec<String> = tally
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        output.push_str(&format!(
            "{}: {} → {}\n",
            packet.title,
            entries.join(", "),
            packet.winner
        ));
    }

    output
}

/// Format a verification report.
pub fn format_verify(report: &VerifyReport) -> String {
    let mut output = String::new();

    if report.seed_recorded == report.seed_recomputed {
        output.push_str(&format!("Seed:    reproduced ({})\n", report.seed_recomputed));
    } else {
        output.push_str("Seed:    MISMATCH\n");
        output.push_str(&format!("  recorded:   {}\n", report.seed_recorded));
        output.push_str(&format!("  recomputed: {}\n", report.seed_recomputed));
    }

    output.push_str(&format!(
        "Packets: {} checked, {} winner mismatches\n",
        report.packets_checked,
        report.mismatches.len()
    ));
    for mismatch in &report.mismatches {
        output.push_str(&format!(
            "  {}: recorded {} but draw yields {}\n",
            mismatch.title, mismatch.recorded, mismatch.recomputed
        ));
    }

    output.push('\n');
    if report.is_clean() {
        output.push_str("Record verified: the draw reproduces exactly.\n");
    } else {
        output.push_str("Record DOES NOT reproduce — inputs or winners were altered.\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PacketResult;
    use crate::verify::Mismatch;
    use crate::Participant;

    fn sample_record() -> ResultRecord {
        ResultRecord {
            title: "Classic Computing Tombola".to_string(),
            timestamp: "2024-03-20T15:00:00+01:00".to_string(),
            drawing_timestamp: "2024-03-21T09:00:00+01:00".to_string(),
            rng_seed: "deadbeef".to_string(),
            packets: vec![PacketResult {
                title: "Paket #1".to_string(),
                participants: vec![
                    Participant {
                        name: "@tuti".to_string(),
                        tickets: 2,
                    },
                    Participant {
                        name: "@obsd_guru".to_string(),
                        tickets: 1,
                    },
                ],
                winner: "@tuti".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_report_shows_tally_and_winner() {
        let formatted = format_report(&sample_record(), 1710943200);
        assert!(formatted.contains("Classic Computing Tombola"));
        assert!(formatted.contains("Timestamp: 2024-03-20T15:00:00+01:00 (1710943200)"));
        assert!(formatted.contains("Seed:      deadbeef"));
        assert!(formatted.contains("Paket #1: @obsd_guru (1), @tuti (2) → @tuti"));
    }

    #[test]
    fn test_format_verify_clean() {
        let report = VerifyReport {
            seed_recorded: "abc".to_string(),
            seed_recomputed: "abc".to_string(),
            packets_checked: 3,
            mismatches: Vec::new(),
        };
        let formatted = format_verify(&report);
        assert!(formatted.contains("Seed:    reproduced (abc)"));
        assert!(formatted.contains("3 checked, 0 winner mismatches"));
        assert!(formatted.contains("verified"));
    }

    #[test]
    fn test_format_verify_mismatch() {
        let report = VerifyReport {
            seed_recorded: "abc".to_string(),
            seed_recomputed: "def".to_string(),
            packets_checked: 1,
            mismatches: vec![Mismatch {
                title: "Paket #1".to_string(),
                recorded: "@x".to_string(),
                recomputed: "@y".to_string(),
            }],
        };
        let formatted = format_verify(&report);
        assert!(formatted.contains("Seed:    MISMATCH"));
        assert!(formatted.contains("Paket #1: recorded @x but draw yields @y"));
        assert!(formatted.contains("DOES NOT reproduce"));
    }
}
