//! Table and card rendering for terminal output.

use chrono::NaiveDateTime;

use siae_core::{
    Backup, BackupOrigin, BackupStatus, CertificateInfo, HealthStatus, Process, ServerRecord,
    format_bytes, format_date_br,
};

fn opt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_date_br).unwrap_or_else(|| "-".to_string())
}

// ── Processes ──

pub fn print_process_table(processes: &[&Process]) {
    println!(
        "{:>6}  {:<30} {:<10} {:<12} {:<12} {}",
        "id", "beneficiary", "sector", "opened", "due", "status"
    );
    if processes.is_empty() {
        println!("  (no processes match)");
        return;
    }
    for process in processes {
        println!(
            "{:>6}  {:<30} {:<10} {:<12} {:<12} {}",
            process.id,
            process.beneficiary,
            process.sector.label(),
            opt_date(process.opened_on),
            opt_date(process.due_on.or_else(|| process.derived_due_date())),
            process.status.label(),
        );
    }
}

pub fn print_process_card(process: &Process) {
    println!("=== Process {} ===", process.id);
    println!("  {:<14} {}", "beneficiary", process.beneficiary);
    println!("  {:<14} {}", "phone", process.phone.as_deref().unwrap_or("-"));
    println!("  {:<14} {}", "subject", process.subject.as_deref().unwrap_or("-"));
    println!("  {:<14} {}", "sector", process.sector.label());
    println!("  {:<14} {}", "opened", opt_date(process.opened_on));
    println!(
        "  {:<14} {}",
        "estimate",
        process.estimate_days.map(|d| format!("{d} days")).unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  {:<14} {}",
        "due",
        opt_date(process.due_on.or_else(|| process.derived_due_date()))
    );
    println!("  {:<14} {}", "closed", opt_date(process.closed_on));
    println!("  {:<14} {}", "status", process.status.label());
    println!();

    let docs = &process.documents;
    let links = [
        ("personal request", docs.request_url.as_deref()),
        ("legal request memo", docs.legal_memo_url.as_deref()),
        ("legal opinion", docs.legal_opinion_url.as_deref()),
        ("executive memo", docs.executive_memo_url.as_deref()),
        ("executive decision", docs.executive_decision_url.as_deref()),
    ];
    println!("Documents");
    let mut any = false;
    for (label, url) in links {
        if let Some(url) = url {
            println!("  {:<20} {}", label, url);
            any = true;
        }
    }
    if !any {
        println!("  (none attached)");
    }
}

// ── Public employees ──

pub fn print_server_table(servers: &[ServerRecord]) {
    println!("{:>6}  {:<30} {}", "id", "full name", "phone");
    if servers.is_empty() {
        println!("  (no employees registered)");
        return;
    }
    for server in servers {
        println!(
            "{:>6}  {:<30} {}",
            server.id,
            server.full_name,
            server.phone.as_deref().unwrap_or("-"),
        );
    }
}

// ── Backups ──

pub fn print_backup_table(backups: &[&Backup]) {
    println!(
        "{:>6}  {:<10} {:<20} {:<34} {:>10}  {}",
        "id", "origin", "created", "file", "size", "status"
    );
    if backups.is_empty() {
        println!("  (no snapshots yet)");
        return;
    }
    for backup in backups {
        let origin = match backup.origin {
            BackupOrigin::Manual => "manual",
            BackupOrigin::Automatic => "automatic",
        };
        let status = match backup.status {
            BackupStatus::Success => "success",
            BackupStatus::InProgress => "in progress",
            BackupStatus::Failed => "failed",
        };
        println!(
            "{:>6}  {:<10} {:<20} {:<34} {:>10}  {}",
            backup.id,
            origin,
            backup.created_at.format("%d/%m/%Y %H:%M"),
            backup.file_name,
            backup.size_bytes.map(format_bytes).unwrap_or_else(|| "-".to_string()),
            status,
        );
    }
}

// ── Certificate ──

pub fn print_certificate(info: Option<&CertificateInfo>, now: NaiveDateTime) {
    match info {
        None => println!("No digital certificate is configured."),
        Some(cert) => {
            println!("=== Digital certificate ===");
            println!("  {:<14} {}", "holder", cert.holder.as_deref().unwrap_or("-"));
            println!("  {:<14} {}", "issuer", cert.issuer.as_deref().unwrap_or("-"));
            match cert.expires_at {
                Some(exp) => {
                    let suffix = if cert.is_expired(now) { "  (EXPIRED)" } else { "" };
                    println!("  {:<14} {}{}", "expires", exp.format("%d/%m/%Y %H:%M"), suffix);
                }
                None => println!("  {:<14} -", "expires"),
            }
        }
    }
}

// ── Health ──

pub fn print_health(health: &HealthStatus) {
    let up = |ok: bool| if ok { "up" } else { "DOWN" };
    println!("  {:<14} {}", "database", up(health.database.is_up));
    println!("  {:<14} {}", "storage", up(health.minio.is_up));
}
