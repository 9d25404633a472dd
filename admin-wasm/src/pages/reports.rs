use crate::components::list_view::{render_list, SearchBar, StatCard};
use crate::components::modal::Modal;
use crate::components::PageContext;
use crate::pages::{action_failed, refetch};
use crate::services::download_csv;
use admin_client::dashboard::{time_ago, ReportStats};
use admin_client::error::AdminClientError;
use admin_client::export::{reports_csv, REPORTS_FILE};
use admin_client::list::{Collection, ListState, ListView, Paginator, REPORTS_PER_PAGE};
use admin_client::models::Report;
use chrono::Utc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Fetch,
    Fetched(u64, Result<Vec<Report>, AdminClientError>),
    Search(String),
    Page(usize),
    Export,
    View(Report),
    Close,
    MarkRead(String),
    MarkedRead(String, Result<(), AdminClientError>),
}

pub struct ReportsPage {
    page: PageContext,
    reports: ListState<Report>,
    search: String,
    current_page: usize,
    viewing: Option<Report>,
    marking: Option<String>,
}

impl ReportsPage {
    fn paginator(&self) -> Paginator {
        let mut pager = Paginator::new(REPORTS_PER_PAGE, self.reports.items().len());
        pager.go_to(self.current_page);
        pager
    }

    fn row(&self, ctx: &Context<Self>, report: &Report) -> Html {
        let link = ctx.link();
        let now = Utc::now();
        let view = report.clone();
        let sender = report
            .contact_name()
            .map(str::to_string)
            .unwrap_or_else(|| "Anonymous".to_string());

        html! {
            <div key={report.id.clone()}
                 class={classes!("card", "p-4", "flex", "gap-4", "items-start", (!report.is_read).then_some("border-l-4 border-orange-400"))}>
                <div class="flex-1 min-w-0">
                    <div class="flex items-center gap-2 text-sm">
                        <span class="font-semibold">{ sender }</span>
                        if let Some(status) = &report.status {
                            <span class="badge">{ status }</span>
                        }
                        if !report.is_read {
                            <span class="badge bg-orange-100 text-orange-700">{ "New" }</span>
                        }
                    </div>
                    <p class="text-sm mt-1 line-clamp-2">{ &report.message }</p>
                    if let Some(at) = report.created_at {
                        <p class="text-xs text-secondary mt-1">{ time_ago(at, now) }</p>
                    }
                </div>
                <button class="btn btn-secondary" onclick={link.callback(move |_| Msg::View(view.clone()))}>
                    { "View" }
                </button>
            </div>
        }
    }

    fn pagination(&self, ctx: &Context<Self>, pager: Paginator) -> Html {
        if pager.total_pages() <= 1 {
            return html! {};
        }
        let link = ctx.link();
        let current = pager.current;

        html! {
            <div class="flex items-center justify-center gap-2">
                <button class="btn btn-secondary" disabled={current == 1}
                        onclick={link.callback(move |_| Msg::Page(current.saturating_sub(1)))}>
                    { "Previous" }
                </button>
                { for pager.window().map(|number| html! {
                    <button key={number}
                            class={classes!("btn", if number == current { "btn-primary" } else { "btn-secondary" })}
                            onclick={link.callback(move |_| Msg::Page(number))}>
                        { number }
                    </button>
                }) }
                <button class="btn btn-secondary" disabled={current == pager.total_pages()}
                        onclick={link.callback(move |_| Msg::Page(current + 1))}>
                    { "Next" }
                </button>
            </div>
        }
    }

    fn view_modal(&self, ctx: &Context<Self>, report: &Report) -> Html {
        let link = ctx.link();
        let id = report.id.clone();
        let marking = self.marking.as_deref() == Some(report.id.as_str());

        html! {
            <Modal title="Report details" on_close={link.callback(|_| Msg::Close)}>
                <dl class="space-y-3 text-sm">
                    if report.is_anonymous {
                        <div>
                            <dt class="text-secondary">{ "Sender" }</dt>
                            <dd>{ "Anonymous" }</dd>
                        </div>
                    } else {
                        <>
                            <div>
                                <dt class="text-secondary">{ "Name" }</dt>
                                <dd>{ report.contact_name().unwrap_or("Unknown") }</dd>
                            </div>
                            <div>
                                <dt class="text-secondary">{ "Email" }</dt>
                                <dd>{ report.contact_email().unwrap_or("N/A") }</dd>
                            </div>
                        </>
                    }
                    <div>
                        <dt class="text-secondary">{ "Status" }</dt>
                        <dd>{ report.status.clone().unwrap_or_else(|| "Unknown".to_string()) }</dd>
                    </div>
                    if let Some(at) = report.created_at {
                        <div>
                            <dt class="text-secondary">{ "Received" }</dt>
                            <dd>{ at.format("%B %-d, %Y %H:%M").to_string() }</dd>
                        </div>
                    }
                    <div>
                        <dt class="text-secondary">{ "Message" }</dt>
                        <dd class="whitespace-pre-wrap">{ &report.message }</dd>
                    </div>
                </dl>
                <div class="flex justify-end gap-3 mt-6">
                    if !report.is_read {
                        <button class="btn btn-primary" disabled={marking}
                                onclick={link.callback(move |_| Msg::MarkRead(id.clone()))}>
                            { if marking { "Marking..." } else { "Mark as read" } }
                        </button>
                    }
                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Close)}>{ "Close" }</button>
                </div>
            </Modal>
        }
    }
}

impl Component for ReportsPage {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Fetch);
        Self {
            page: PageContext::from_link(ctx.link()),
            reports: ListState::new(),
            search: String::new(),
            current_page: 1,
            viewing: None,
            marking: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Fetch => {
                let ticket = self.reports.begin();
                let search = self.search.clone();

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Fetched(ticket, api.list_reports(&search).await));
                });
            }
            Msg::Fetched(ticket, result) => {
                if let Err(e) = &result {
                    if self.reports.is_current(ticket) {
                        action_failed(&self.page, e, "Failed to fetch reports");
                    }
                }
                if !self.reports.finish(ticket, result, "Failed to fetch reports") {
                    return false;
                }
                self.current_page = 1;
            }
            Msg::Search(value) => {
                self.search = value;
                refetch(ctx.link(), Collection::Reports, || Msg::Fetch);
            }
            Msg::Page(number) => {
                let mut pager = self.paginator();
                if !pager.go_to(number) {
                    return false;
                }
                self.current_page = pager.current;
            }
            Msg::Export => {
                let csv = reports_csv(self.reports.items());
                match download_csv(REPORTS_FILE, &csv) {
                    Ok(()) => self.page.toaster.success("Reports exported"),
                    Err(e) => {
                        log::error!("CSV export failed: {:?}", e);
                        self.page.toaster.error("Failed to export reports");
                    }
                }
                return false;
            }
            Msg::View(report) => self.viewing = Some(report),
            Msg::Close => self.viewing = None,
            Msg::MarkRead(id) => {
                self.marking = Some(id.clone());

                let api = self.page.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.mark_report_read(&id).await;
                    link.send_message(Msg::MarkedRead(id, result));
                });
            }
            Msg::MarkedRead(id, result) => {
                self.marking = None;
                match result {
                    Ok(()) => {
                        self.reports.update_where(|r| r.id == id, |r| r.is_read = true);
                        if let Some(report) = self.viewing.as_mut().filter(|r| r.id == id) {
                            report.is_read = true;
                        }
                        self.page.toaster.success("Report marked as read");
                    }
                    Err(e) => action_failed(&self.page, &e, "Failed to mark report as read"),
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let stats = ReportStats::from_reports(self.reports.items());
        let pager = self.paginator();
        let view = match self.reports.view() {
            ListView::Ready(items) => ListView::Ready(pager.slice(items)),
            other => other,
        };

        html! {
            <div class="space-y-6">
                <div class="flex flex-col md:flex-row md:items-center md:justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">{ "Reports" }</h1>
                        <p class="text-secondary">{ "Messages submitted through the public site" }</p>
                    </div>
                    <button class="btn btn-secondary" onclick={link.callback(|_| Msg::Export)}
                            disabled={self.reports.items().is_empty()}>
                        { "Export CSV" }
                    </button>
                </div>

                <div class="grid gap-4 sm:grid-cols-3">
                    <StatCard label="Total reports" value={stats.total.to_string()} />
                    <StatCard label="Anonymous" value={stats.anonymous.to_string()} accent="var(--accent)" />
                    <StatCard label="Pending" value={stats.pending.to_string()} accent="var(--warning)" />
                </div>

                <div class="card p-4">
                    <SearchBar value={self.search.clone()} placeholder="Search reports..."
                               on_input={link.callback(Msg::Search)} />
                </div>

                { render_list(
                    view,
                    "No reports found",
                    link.callback(|_| Msg::Fetch),
                    |report| self.row(ctx, report),
                ) }

                { self.pagination(ctx, pager) }

                if let Some(report) = &self.viewing {
                    { self.view_modal(ctx, report) }
                }
            </div>
        }
    }
}
