//! # Report Rendering
//!
//! Text formatting for status blocks and list tables, plus styled console
//! message helpers. All report output goes through the caller's sink; only
//! the message helpers talk to the process streams directly.

use std::io::{self, Write};

use chrono::{SecondsFormat, TimeZone, Utc};
use colored::Colorize;

use appadm_core::{ApplicationReport, AttemptReport, ContainerReport, ListFilter};

const APPLICATION_WIDTHS: [usize; 9] = [30, 20, 20, 10, 10, 18, 18, 15, 35];
const ATTEMPT_WIDTHS: [usize; 4] = [30, 20, 35, 35];
const CONTAINER_WIDTHS: [usize; 7] = [30, 20, 20, 20, 20, 20, 35];

/// Render a progress fraction as a percentage, trimming trailing zeros
/// (0.5 -> "50%", 0.5379 -> "53.79%")
pub fn format_progress(progress: f32) -> String {
    let mut s = format!("{:.2}", progress * 100.0);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s.push('%');
    s
}

/// Render epoch millis as ISO-8601 UTC, or N/A when unset
pub fn format_millis(millis: Option<i64>) -> String {
    match millis {
        Some(ms) if ms > 0 => Utc
            .timestamp_millis_opt(ms)
            .single()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|| "N/A".to_string()),
        _ => "N/A".to_string(),
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn write_row(out: &mut dyn Write, widths: &[usize], cells: &[&str]) -> io::Result<()> {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            write!(out, "\t")?;
        }
        write!(out, "{cell:>width$}")?;
    }
    writeln!(out)
}

/// Labeled key:value block for a single application
pub fn write_application_report(out: &mut dyn Write, report: &ApplicationReport) -> io::Result<()> {
    writeln!(out, "Application Report : ")?;
    writeln!(out, "\tApplication-Id : {}", report.id)?;
    writeln!(out, "\tApplication-Name : {}", report.name)?;
    writeln!(out, "\tApplication-Type : {}", report.app_type)?;
    writeln!(out, "\tUser : {}", report.user)?;
    writeln!(out, "\tQueue : {}", report.queue)?;
    writeln!(out, "\tApplication-Priority : {}", report.priority)?;
    writeln!(out, "\tStart-Time : {}", format_millis(report.start_time))?;
    writeln!(out, "\tFinish-Time : {}", format_millis(report.finish_time))?;
    writeln!(out, "\tProgress : {}", format_progress(report.progress))?;
    writeln!(out, "\tState : {}", report.state)?;
    writeln!(out, "\tFinal-State : {}", report.final_status)?;
    writeln!(out, "\tTracking-URL : {}", or_na(&report.tracking_url))?;
    writeln!(out, "\tRPC-Port : {}", report.rpc_port)?;
    writeln!(out, "\tAM-Host : {}", or_na(&report.host))?;
    if let Some(expiry) = &report.lifetime_expiry {
        writeln!(out, "\tLifetime-Expiry : {expiry}")?;
    }
    writeln!(out, "\tDiagnostics : {}", report.diagnostics)
}

/// Labeled key:value block for a single attempt
pub fn write_attempt_report(out: &mut dyn Write, report: &AttemptReport) -> io::Result<()> {
    writeln!(out, "Application Attempt Report : ")?;
    writeln!(out, "\tApplicationAttempt-Id : {}", report.id)?;
    writeln!(out, "\tState : {}", report.state)?;
    let am_container = report
        .am_container_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    writeln!(out, "\tAMContainer : {am_container}")?;
    writeln!(out, "\tTracking-URL : {}", or_na(&report.tracking_url))?;
    writeln!(out, "\tRPC-Port : {}", report.rpc_port)?;
    writeln!(out, "\tAM-Host : {}", or_na(&report.host))?;
    writeln!(out, "\tDiagnostics : {}", report.diagnostics)
}

/// Labeled key:value block for a single container
pub fn write_container_report(out: &mut dyn Write, report: &ContainerReport) -> io::Result<()> {
    writeln!(out, "Container Report : ")?;
    writeln!(out, "\tContainer-Id : {}", report.id)?;
    writeln!(out, "\tStart-Time : {}", format_millis(report.creation_time))?;
    writeln!(out, "\tFinish-Time : {}", format_millis(report.finish_time))?;
    writeln!(out, "\tState : {}", report.state)?;
    writeln!(out, "\tHost : {}", or_na(&report.host))?;
    writeln!(
        out,
        "\tNode-Http-Address : {}",
        report.node_http_address.as_deref().unwrap_or("N/A")
    )?;
    writeln!(out, "\tLOG-URL : {}", or_na(&report.log_url))?;
    writeln!(out, "\tDiagnostics : {}", report.diagnostics)
}

/// Fixed-width application table with a leading total-count line echoing
/// the active filter
pub fn write_application_table(
    out: &mut dyn Write,
    reports: &[ApplicationReport],
    filter: &ListFilter,
) -> io::Result<()> {
    let types: Vec<&str> = filter.app_types.iter().map(String::as_str).collect();
    let states: Vec<String> = filter.states.iter().map(|s| s.to_string()).collect();
    let tags: Vec<&str> = filter.tags.iter().map(String::as_str).collect();
    writeln!(
        out,
        "Total number of applications (application-types: [{}], states: [{}] and tags: [{}]):{}",
        types.join(", "),
        states.join(", "),
        tags.join(", "),
        reports.len()
    )?;
    write_row(
        out,
        &APPLICATION_WIDTHS,
        &[
            "Application-Id",
            "Application-Name",
            "Application-Type",
            "User",
            "Queue",
            "State",
            "Final-State",
            "Progress",
            "Tracking-URL",
        ],
    )?;
    for report in reports {
        write_row(
            out,
            &APPLICATION_WIDTHS,
            &[
                &report.id.to_string(),
                &report.name,
                &report.app_type,
                &report.user,
                &report.queue,
                report.state.as_str(),
                &report.final_status.to_string(),
                &format_progress(report.progress),
                or_na(&report.tracking_url),
            ],
        )?;
    }
    Ok(())
}

/// Fixed-width attempt table
pub fn write_attempt_table(out: &mut dyn Write, reports: &[AttemptReport]) -> io::Result<()> {
    writeln!(out, "Total number of application attempts :{}", reports.len())?;
    write_row(
        out,
        &ATTEMPT_WIDTHS,
        &["ApplicationAttempt-Id", "State", "AM-Container-Id", "Tracking-URL"],
    )?;
    for report in reports {
        let am_container = report
            .am_container_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        write_row(
            out,
            &ATTEMPT_WIDTHS,
            &[
                &report.id.to_string(),
                &report.state,
                &am_container,
                or_na(&report.tracking_url),
            ],
        )?;
    }
    Ok(())
}

/// Fixed-width container table
pub fn write_container_table(out: &mut dyn Write, reports: &[ContainerReport]) -> io::Result<()> {
    writeln!(out, "Total number of containers :{}", reports.len())?;
    write_row(
        out,
        &CONTAINER_WIDTHS,
        &[
            "Container-Id",
            "Start-Time",
            "Finish-Time",
            "State",
            "Host",
            "Node-Http-Address",
            "LOG-URL",
        ],
    )?;
    for report in reports {
        write_row(
            out,
            &CONTAINER_WIDTHS,
            &[
                &report.id.to_string(),
                &format_millis(report.creation_time),
                &format_millis(report.finish_time),
                &report.state,
                or_na(&report.host),
                report.node_http_address.as_deref().unwrap_or("N/A"),
                or_na(&report.log_url),
            ],
        )?;
    }
    Ok(())
}

/// Print an error to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
