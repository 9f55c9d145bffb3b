// crates/seclens-app/src/lib.rs
// seclens - Leptos WASM frontend (CSR)

use leptos::prelude::*;
use leptos_meta::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod api;
pub mod diff;
pub mod session;

use api::HttpTransport;
use diff::{DiffLine, DiffPane, DiffRendererContext, DiffRow, SplitDiffRenderer};
use session::{Phase, SessionHandle, SessionState, submit};

// Re-export shared types
pub use seclens_types::*;

impl SessionHandle for RwSignal<SessionState> {
    fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

// ============================================================================
// WASM Entry Point
// ============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("seclens starting...");

    leptos::mount::mount_to_body(App);
}

// ============================================================================
// App Root
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(DiffRendererContext::new(SplitDiffRenderer));

    view! {
        <Title text="seclens"/>
        <AnalyzerPage/>
    }
}

// ============================================================================
// Analyzer Page
// ============================================================================

#[component]
fn AnalyzerPage() -> impl IntoView {
    let session = RwSignal::new(SessionState::new());

    let on_input = move |ev| {
        let code = event_target_value(&ev);
        session.update(|s| s.edit(code));
    };

    let phase = Memo::new(move |_| session.with(SessionState::phase));

    let on_submit = move |_| {
        if !session.with_untracked(SessionState::can_submit) {
            return;
        }
        spawn_local(async move {
            let transport = HttpTransport;
            submit(session, &transport).await;
        });
    };

    view! {
        <main class="container">
            <header class="page-header">
                <h1>"seclens"</h1>
                <p class="muted">"Security review and automatic fixes for code snippets"</p>
            </header>

            <section class="card">
                <h2>"Submit Your Code"</h2>
                <p class="muted">
                    "Paste your code below and we'll analyze it for common security vulnerabilities"
                </p>
                <textarea
                    class="code-input"
                    placeholder="// Paste your code here..."
                    spellcheck="false"
                    prop:value=move || session.with(|s| s.code.clone())
                    on:input=on_input
                ></textarea>
                <button
                    class="analyze-button"
                    disabled=move || !session.with(SessionState::can_submit)
                    on:click=on_submit
                >
                    {move || if phase.get() == Phase::Analyzing { "Analyzing..." } else { "Analyze Code" }}
                </button>
            </section>

            <Show when=move || phase.get() == Phase::Errored>
                <ErrorAlert session=session/>
            </Show>

            <Show when=move || phase.get() == Phase::Resulted>
                <ResultView session=session/>
            </Show>
        </main>
    }
}

#[component]
fn ErrorAlert(session: RwSignal<SessionState>) -> impl IntoView {
    view! {
        <div class="alert alert-error" role="alert">
            <div class="alert-title">"Error"</div>
            <p>{move || session.with(|s| s.error.clone().unwrap_or_default())}</p>
            <button class="alert-dismiss" on:click=move |_| session.update(SessionState::dismiss_error)>
                "Dismiss"
            </button>
        </div>
    }
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultTab {
    Diff,
    Fixed,
}

#[component]
fn ResultView(session: RwSignal<SessionState>) -> impl IntoView {
    let (tab, set_tab) = signal(ResultTab::Diff);
    let original = Signal::derive(move || session.with(|s| s.code.clone()));
    let fixed = Signal::derive(move || session.with(|s| s.fixed_code.clone()));

    view! {
        <div class="results">
            <VulnerabilityList session=session/>

            <section class="card">
                <h2>"Code Diff"</h2>
                <p class="muted">"See the changes made to fix the detected vulnerabilities"</p>
                <div class="tabs" role="tablist">
                    <TabButton label="Diff View" value=ResultTab::Diff tab=tab set_tab=set_tab/>
                    <TabButton label="Fixed Code" value=ResultTab::Fixed tab=tab set_tab=set_tab/>
                </div>
                {move || match tab.get() {
                    ResultTab::Diff => view! { <DiffView original=original modified=fixed/> }.into_any(),
                    ResultTab::Fixed => view! {
                        <div class="fixed-code">
                            <pre>{move || fixed.get()}</pre>
                        </div>
                    }.into_any(),
                }}
            </section>
        </div>
    }
}

#[component]
fn VulnerabilityList(session: RwSignal<SessionState>) -> impl IntoView {
    move || {
        let vulnerabilities = session.with(|s| s.vulnerabilities.clone());
        if vulnerabilities.is_empty() {
            view! {
                <div class="alert alert-ok">
                    <div class="alert-title">"No Vulnerabilities Detected"</div>
                    <p>"Your code appears to be secure based on our analysis."</p>
                </div>
            }
            .into_any()
        } else {
            view! {
                <div class="alert alert-danger">
                    <div class="alert-title">"Vulnerabilities Detected"</div>
                    <ul class="vuln-list">
                        {vulnerabilities.into_iter().map(|v| view! { <li>{v}</li> }).collect_view()}
                    </ul>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn TabButton(
    label: &'static str,
    value: ResultTab,
    tab: ReadSignal<ResultTab>,
    set_tab: WriteSignal<ResultTab>,
) -> impl IntoView {
    view! {
        <button
            role="tab"
            class=move || if tab.get() == value { "tab tab-active" } else { "tab" }
            on:click=move |_| set_tab.set(value)
        >
            {label}
        </button>
    }
}

// ============================================================================
// Diff View
// ============================================================================

/// Split diff of `original` against `modified`, drawn by whatever renderer
/// the app put in context. The skeleton stays up for the first frame and
/// whenever no renderer is installed.
#[component]
fn DiffView(original: Signal<String>, modified: Signal<String>) -> impl IntoView {
    let renderer = use_context::<DiffRendererContext>();
    let (ready, set_ready) = signal(false);
    request_animation_frame(move || {
        set_ready.try_set(true);
    });

    let pane = move || {
        let ready = ready.get();
        original.with(|old| {
            modified.with(|new| DiffPane::resolve(renderer.as_ref(), ready, old, new))
        })
    };

    move || match pane() {
        DiffPane::Loading => view! { <DiffSkeleton/> }.into_any(),
        DiffPane::Ready(rows) => view! {
            <div class="diff-view">
                <table class="diff-table">
                    <tbody>
                        {rows.into_iter().map(|row| view! { <DiffRowView row=row/> }).collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn DiffRowView(row: DiffRow) -> impl IntoView {
    let (old_class, new_class) = row.kind.cell_classes();
    let (old_no, old_text) = line_parts(row.old);
    let (new_no, new_text) = line_parts(row.new);

    view! {
        <tr>
            <td class="diff-lineno">{old_no}</td>
            <td class=old_class><pre>{old_text}</pre></td>
            <td class="diff-lineno">{new_no}</td>
            <td class=new_class><pre>{new_text}</pre></td>
        </tr>
    }
}

fn line_parts(line: Option<DiffLine>) -> (String, String) {
    line.map(|l| (l.number.to_string(), l.text))
        .unwrap_or_default()
}

#[component]
fn DiffSkeleton() -> impl IntoView {
    let widths = ["w-full", "w-full", "w-3-4", "w-full", "w-5-6"];
    view! {
        <div class="skeleton-stack">
            {widths
                .into_iter()
                .map(|w| view! { <div class=format!("skeleton {w}")></div> })
                .collect_view()}
        </div>
    }
}
