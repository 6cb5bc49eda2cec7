//! Reports
//!
//! Aggregates computed from the lead list for the reports and dashboard
//! pages. A closed lead counts as a deal worth its budget; its closing date
//! is taken from `updated_at`.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::domain::{Broker, CalendarEvent, Lead, LeadOrigin, LeadStatus};
use crate::labels::CodeLabel;

const MONTH_LABELS: [&str; 12] = ["Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez"];

/// Whole percent of `part` in `whole`, 0 when `whole` is 0
pub fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 * 100.0 / whole as f64).round() as u32
}

fn is_closed(lead: &Lead) -> bool {
    lead.status.is(LeadStatus::Closed)
}

fn same_month(a: DateTime<Utc>, year: i32, month: u32) -> bool {
    a.year() == year && a.month() == month
}

/// Period selector on the reports page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl CodeLabel for ReportPeriod {
    const ALL: &'static [Self] = &[
        ReportPeriod::Weekly,
        ReportPeriod::Monthly,
        ReportPeriod::Quarterly,
        ReportPeriod::Yearly,
    ];
    const DEFAULT: Self = ReportPeriod::Monthly;

    fn code(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
            ReportPeriod::Quarterly => "quarterly",
            ReportPeriod::Yearly => "yearly",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Weekly => "Semanal",
            ReportPeriod::Monthly => "Mensal",
            ReportPeriod::Quarterly => "Trimestral",
            ReportPeriod::Yearly => "Anual",
        }
    }
}

impl ReportPeriod {
    /// Number of buckets charted: weeks for `Weekly`, calendar months otherwise
    pub fn buckets(&self) -> usize {
        match self {
            ReportPeriod::Weekly => 8,
            ReportPeriod::Monthly => 6,
            ReportPeriod::Quarterly => 3,
            ReportPeriod::Yearly => 12,
        }
    }
}

/// One bar of the sales funnel
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStage {
    pub status: LeadStatus,
    /// Leads that reached at least this stage
    pub count: usize,
    /// Percent of the first stage
    pub conversion: u32,
}

/// Funnel over every stage but `perdido`.
///
/// Lost leads count toward the first stage only, so counts never increase
/// from one stage to the next.
pub fn sales_funnel(leads: &[Lead]) -> Vec<FunnelStage> {
    let stages: Vec<LeadStatus> = leads.iter().filter_map(Lead::stage).collect();
    let entered = stages.len();

    LeadStatus::ALL
        .iter()
        .filter(|status| **status != LeadStatus::Lost)
        .map(|status| {
            let count = if status.stage_index() == 0 {
                entered
            } else {
                stages
                    .iter()
                    .filter(|s| **s != LeadStatus::Lost && s.stage_index() >= status.stage_index())
                    .count()
            };
            FunnelStage {
                status: *status,
                count,
                conversion: percent(count, entered),
            }
        })
        .collect()
}

/// Lead count for one origin
#[derive(Debug, Clone, PartialEq)]
pub struct OriginShare {
    pub origin: LeadOrigin,
    pub count: usize,
    pub percent: u32,
}

/// Leads per origin, largest first. Unknown origin codes count as "Outro".
pub fn origin_breakdown(leads: &[Lead]) -> Vec<OriginShare> {
    let mut counts: HashMap<LeadOrigin, usize> = HashMap::new();
    for lead in leads {
        *counts.entry(lead.origin.known().unwrap_or(LeadOrigin::DEFAULT)).or_default() += 1;
    }

    let mut shares: Vec<OriginShare> = LeadOrigin::ALL
        .iter()
        .filter_map(|origin| {
            counts.get(origin).map(|count| OriginShare {
                origin: *origin,
                count: *count,
                percent: percent(*count, leads.len()),
            })
        })
        .collect();
    // stable sort keeps table order between ties
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

/// Closed business per broker
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerPerformance {
    pub broker_id: String,
    pub name: String,
    pub deals: usize,
    pub revenue: f64,
}

/// Every broker with their closed deals, best revenue first
pub fn broker_ranking(leads: &[Lead], brokers: &[Broker]) -> Vec<BrokerPerformance> {
    let mut ranking: Vec<BrokerPerformance> = brokers
        .iter()
        .map(|broker| {
            let closed: Vec<&Lead> = leads
                .iter()
                .filter(|lead| is_closed(lead) && lead.assigned_broker_id.as_deref() == Some(broker.id.as_str()))
                .collect();
            BrokerPerformance {
                broker_id: broker.id.clone(),
                name: broker.name.clone(),
                deals: closed.len(),
                revenue: closed.iter().filter_map(|lead| lead.budget).sum(),
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then(b.deals.cmp(&a.deals)));
    ranking
}

/// Activity within one charted bucket, a week or a calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodPerformance {
    /// First day of the bucket
    pub start: NaiveDate,
    /// "dd/mm" for weeks, "Mmm/yyyy" for months
    pub label: String,
    /// Leads created in the bucket
    pub leads: usize,
    /// Leads closed in the bucket, by `updated_at`
    pub deals: usize,
    pub revenue: f64,
}

/// Half-open day range `[start, end)` with its chart label
struct Window {
    start: NaiveDate,
    end: NaiveDate,
    label: String,
}

impl Window {
    fn contains(&self, at: DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.start && day < self.end
    }
}

fn month_start(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// The last `count` calendar months up to and including `today`'s
fn month_windows(count: usize, today: NaiveDate) -> Vec<Window> {
    let current = today.year() * 12 + today.month0() as i32;
    (0..count as i32)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            let start = month_start(index)?;
            let end = month_start(index + 1)?;
            let label = format!("{}/{}", MONTH_LABELS[start.month0() as usize], start.year());
            Some(Window { start, end, label })
        })
        .collect()
}

/// The last `count` Monday-based weeks up to and including `today`'s
fn week_windows(count: usize, today: NaiveDate) -> Vec<Window> {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (0..count as i64)
        .rev()
        .map(|back| {
            let start = monday - Duration::weeks(back);
            Window {
                start,
                end: start + Duration::weeks(1),
                label: start.format("%d/%m").to_string(),
            }
        })
        .collect()
}

fn performance_in(leads: &[Lead], windows: Vec<Window>) -> Vec<PeriodPerformance> {
    windows
        .into_iter()
        .map(|window| {
            let closed: Vec<&Lead> = leads
                .iter()
                .filter(|lead| is_closed(lead) && window.contains(lead.updated_at))
                .collect();
            PeriodPerformance {
                leads: leads.iter().filter(|lead| window.contains(lead.created_at)).count(),
                deals: closed.len(),
                revenue: closed.iter().filter_map(|lead| lead.budget).sum(),
                start: window.start,
                label: window.label,
            }
        })
        .collect()
}

/// The last `months` calendar months up to and including `today`'s,
/// oldest first.
pub fn monthly_performance(leads: &[Lead], months: usize, today: DateTime<Utc>) -> Vec<PeriodPerformance> {
    performance_in(leads, month_windows(months, today.date_naive()))
}

/// The last `weeks` weeks (Monday to Sunday) up to and including
/// `today`'s, oldest first.
pub fn weekly_performance(leads: &[Lead], weeks: usize, today: DateTime<Utc>) -> Vec<PeriodPerformance> {
    performance_in(leads, week_windows(weeks, today.date_naive()))
}

/// Buckets charted for `period`
pub fn period_performance(leads: &[Lead], period: ReportPeriod, today: DateTime<Utc>) -> Vec<PeriodPerformance> {
    match period {
        ReportPeriod::Weekly => weekly_performance(leads, period.buckets(), today),
        _ => monthly_performance(leads, period.buckets(), today),
    }
}

/// Headline numbers over the charted buckets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportSummary {
    pub total_revenue: f64,
    pub total_deals: usize,
    pub total_leads: usize,
    pub conversion_rate: u32,
}

impl ReportSummary {
    pub fn from_periods(periods: &[PeriodPerformance]) -> Self {
        let total_revenue = periods.iter().map(|p| p.revenue).sum();
        let total_deals = periods.iter().map(|p| p.deals).sum();
        let total_leads = periods.iter().map(|p| p.leads).sum();
        Self {
            total_revenue,
            total_deals,
            total_leads,
            conversion_rate: percent(total_deals, total_leads),
        }
    }
}

/// Cards at the top of the dashboard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    /// Leads neither closed nor lost
    pub active_leads: usize,
    pub conversion_rate: u32,
    /// Events starting within the next seven days
    pub visits_scheduled: usize,
    pub closed_this_month: usize,
}

impl DashboardStats {
    pub fn compute(leads: &[Lead], events: &[CalendarEvent], now: DateTime<Utc>) -> Self {
        let week_end = now + Duration::days(7);
        let closed = leads.iter().filter(|lead| is_closed(lead)).count();
        Self {
            active_leads: leads
                .iter()
                .filter(|lead| lead.stage().is_some_and(|s| s.is_open()))
                .count(),
            conversion_rate: percent(closed, leads.len()),
            visits_scheduled: events
                .iter()
                .filter(|e| e.start_time >= now && e.start_time < week_end)
                .count(),
            closed_this_month: leads
                .iter()
                .filter(|lead| is_closed(lead) && same_month(lead.updated_at, now.year(), now.month()))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn lead(id: &str, status: LeadStatus, budget: Option<f64>, when: DateTime<Utc>) -> Lead {
        let mut lead = Lead::new(id, id, "0", status);
        lead.budget = budget;
        lead.created_at = when;
        lead.updated_at = when;
        lead
    }

    fn pipeline() -> Vec<Lead> {
        let day = at(2025, 11, 10);
        vec![
            lead("a", LeadStatus::New, None, day),
            lead("b", LeadStatus::Contacted, None, day),
            lead("c", LeadStatus::Qualified, None, day),
            lead("d", LeadStatus::Negotiating, Some(500_000.0), day),
            lead("e", LeadStatus::Closed, Some(800_000.0), day),
            lead("f", LeadStatus::Lost, None, day),
        ]
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn test_funnel_counts_are_monotone() {
        let funnel = sales_funnel(&pipeline());
        let counts: Vec<usize> = funnel.iter().map(|s| s.count).collect();
        assert_eq!(counts, [6, 4, 3, 2, 2, 1]);
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert!(funnel.iter().all(|s| s.status != LeadStatus::Lost));
        assert_eq!(funnel[0].conversion, 100);
        assert_eq!(funnel[5].conversion, 17);
    }

    #[test]
    fn test_funnel_of_nothing() {
        let funnel = sales_funnel(&[]);
        assert_eq!(funnel.len(), 6);
        assert!(funnel.iter().all(|s| s.count == 0 && s.conversion == 0));
    }

    #[test]
    fn test_origin_breakdown_sorted() {
        let day = at(2025, 1, 1);
        let mut leads = vec![
            lead("a", LeadStatus::New, None, day),
            lead("b", LeadStatus::New, None, day),
            lead("c", LeadStatus::New, None, day),
        ];
        leads[0].origin = LeadOrigin::Referral.into();
        leads[1].origin = LeadOrigin::Website.into();
        leads[2].origin = LeadOrigin::Website.into();

        let shares = origin_breakdown(&leads);
        assert_eq!(shares[0].origin, LeadOrigin::Website);
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].percent, 67);
        assert_eq!(shares[1].origin, LeadOrigin::Referral);
        assert_eq!(shares.len(), 2);
    }

    #[test]
    fn test_broker_ranking() {
        let day = at(2025, 1, 1);
        let mut leads = vec![
            lead("a", LeadStatus::Closed, Some(300_000.0), day),
            lead("b", LeadStatus::Closed, Some(400_000.0), day),
            lead("c", LeadStatus::Closed, Some(900_000.0), day),
            lead("d", LeadStatus::Negotiating, Some(5_000_000.0), day),
        ];
        leads[0].assigned_broker_id = Some("ana".into());
        leads[1].assigned_broker_id = Some("ana".into());
        leads[2].assigned_broker_id = Some("carlos".into());
        leads[3].assigned_broker_id = Some("julia".into());
        let brokers = [
            Broker::new("ana", "Ana", "a@x"),
            Broker::new("carlos", "Carlos", "c@x"),
            Broker::new("julia", "Julia", "j@x"),
        ];

        let ranking = broker_ranking(&leads, &brokers);
        let order: Vec<&str> = ranking.iter().map(|b| b.broker_id.as_str()).collect();
        assert_eq!(order, ["carlos", "ana", "julia"]);
        assert_eq!(ranking[1].deals, 2);
        assert_eq!(ranking[1].revenue, 700_000.0);
        assert_eq!(ranking[2].deals, 0);
    }

    #[test]
    fn test_monthly_performance_spans_year_boundary() {
        let leads = vec![
            lead("a", LeadStatus::New, None, at(2025, 12, 3)),
            lead("b", LeadStatus::Closed, Some(250_000.0), at(2026, 1, 20)),
            lead("c", LeadStatus::Closed, Some(100_000.0), at(2026, 2, 1)),
            lead("old", LeadStatus::Closed, Some(1.0), at(2025, 1, 1)),
        ];
        let months = monthly_performance(&leads, 3, at(2026, 2, 15));
        let labels: Vec<&str> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Dez/2025", "Jan/2026", "Fev/2026"]);
        assert_eq!(months[0].start, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(months[0].leads, 1);
        assert_eq!(months[1].deals, 1);
        assert_eq!(months[1].revenue, 250_000.0);

        let summary = ReportSummary::from_periods(&months);
        assert_eq!(summary.total_leads, 3);
        assert_eq!(summary.total_deals, 2);
        assert_eq!(summary.total_revenue, 350_000.0);
        assert_eq!(summary.conversion_rate, 67);
    }

    #[test]
    fn test_dashboard_stats() {
        let now = at(2025, 11, 10);
        let leads = pipeline();
        let events = [
            CalendarEvent::new("soon", "Visita", now + Duration::days(2), now + Duration::days(2)),
            CalendarEvent::new("later", "Visita", now + Duration::days(8), now + Duration::days(8)),
            CalendarEvent::new("past", "Visita", now - Duration::days(1), now - Duration::days(1)),
        ];
        let stats = DashboardStats::compute(&leads, &events, now);
        assert_eq!(stats.active_leads, 4);
        assert_eq!(stats.conversion_rate, 17);
        assert_eq!(stats.visits_scheduled, 1);
        assert_eq!(stats.closed_this_month, 1);
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(ReportPeriod::from_code("quarterly"), Some(ReportPeriod::Quarterly));
        assert_eq!(ReportPeriod::Yearly.label(), "Anual");
        assert_eq!(ReportPeriod::default().buckets(), 6);
    }

    #[test]
    fn test_weekly_period_charts_weeks() {
        // 2026-02-18 is a Wednesday
        let today = at(2026, 2, 18);
        let leads = vec![
            lead("mon", LeadStatus::Closed, Some(100_000.0), at(2026, 2, 16)),
            lead("sun", LeadStatus::New, None, at(2026, 2, 15)),
            lead("month-ago", LeadStatus::New, None, at(2026, 1, 20)),
            lead("too-old", LeadStatus::New, None, at(2025, 12, 1)),
        ];

        let weekly = period_performance(&leads, ReportPeriod::Weekly, today);
        assert_eq!(weekly.len(), 8);
        assert_eq!(weekly[7].start, NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(weekly[7].label, "16/02");
        assert_eq!(weekly[0].label, "29/12");
        assert_eq!((weekly[7].leads, weekly[7].deals), (1, 1));
        assert_eq!(weekly[6].leads, 1);
        assert_eq!(weekly[3].leads, 1);
        assert_eq!(ReportSummary::from_periods(&weekly).total_leads, 3);

        let monthly = period_performance(&leads, ReportPeriod::Monthly, today);
        assert_eq!(monthly.len(), 6);
        assert_eq!(monthly[5].label, "Fev/2026");
        assert_ne!(weekly, monthly);
    }

    #[test]
    fn test_each_period_has_its_own_window() {
        let today = at(2026, 2, 18);
        let sizes: Vec<usize> = ReportPeriod::ALL
            .iter()
            .map(|p| period_performance(&[], *p, today).len())
            .collect();
        assert_eq!(sizes, [8, 6, 3, 12]);
    }
}
