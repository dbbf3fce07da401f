use crate::{
    clock::{self, ClockSnapshot},
    config::{ContactDelivery, SiteConfig},
    contact::{interpret_reply, Category, Inquiry, SubmitError, SubmitStatus},
    logging::{log_event, LogLevel},
    particles::{ParticleConfig, ParticleField, Shape},
    scroll::{ScrollStyles, DESKTOP_MEDIA_QUERY},
    typewriter::{Typewriter, HERO_DELAY_MS},
};
use gloo_net::http::Request;
use gloo_timers::callback::{Interval, Timeout};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, FormData, HtmlFormElement};
use yew::prelude::*;

const HERO_HEADLINE: &str = "成長の道を、共に歩むパートナー";

struct Service {
    glyph: &'static str,
    title: &'static str,
    description: &'static str,
    features: [&'static str; 3],
}

const SERVICES: [Service; 3] = [
    Service {
        glyph: "◎",
        title: "助成金コンサルティング",
        description: "企業や個人事業主の皆さまが活用できる各種助成金制度について、情報収集から申請書類の作成、提出までを一貫してサポートいたします。",
        features: [
            "返済不要の資金調達手段として活用",
            "豊富な実務経験による最適な制度選定",
            "スムーズな受給に向けた具体的な支援",
        ],
    },
    Service {
        glyph: "▣",
        title: "公共事業入札支援",
        description: "官公庁や自治体が発注する公共事業は、安定性と規模の大きさが魅力ですが、入札や契約に至るまでのプロセスは複雑であり、専門的な知識と丁寧な準備が欠かせません。",
        features: [
            "公告情報の収集・分析から入札戦略立案",
            "必要書類の作成支援",
            "安定した事業基盤の構築サポート",
        ],
    },
    Service {
        glyph: "◆",
        title: "営業業務の効率化",
        description: "最新のAI技術を活用し、営業活動の効率化と売上向上を実現します。顧客データの分析、リード管理の自動化、営業活動の最適化により、営業チームの生産性を大幅に向上させます。",
        features: [
            "顧客データ分析による営業戦略立案",
            "リード管理の自動化・効率化",
            "営業活動の最適化と売上向上支援",
        ],
    },
];

const TECHNOLOGIES: [(&str, &str, &str); 4] = [
    ("</>", "AI開発", "最新の生成AI技術を活用したカスタムソリューション開発"),
    ("▤", "データ分析", "ビッグデータ分析による業務効率化と意思決定支援"),
    ("◍", "Webシステム", "スケーラブルでセキュアなWebアプリケーション構築"),
    ("ϟ", "自動化", "RPAとAIを組み合わせた業務プロセス自動化"),
];

const OUTCOMES: [(&str, &str); 4] = [
    ("業務効率化", "定型業務の自動化により、生産性が向上"),
    ("コスト削減", "助成金活用とAI導入で経費を大幅削減"),
    ("競争力向上", "最新技術導入で市場での優位性確保"),
    ("新規事業創出", "AI技術を活用した新しいビジネスモデル"),
];

const COMPANY_FACTS: [(&str, &str); 5] = [
    ("会社名", "株式会社想樹"),
    ("創業", "2024年3月"),
    ("所在地", "東京都世田谷区松原5-58-17"),
    ("代表取締役", "千羽 太樹"),
    ("メール", "info@souki-cp.co.jp"),
];

const MESSAGE_PARAGRAPHS: [&str; 3] = [
    "私たちは、公共領域にも安心して導入できる仕組みと、最新の生成AIを組み合わせ、これからの社会に必要とされる業務スタイルを創り出していきます。",
    "テンプレではなく、一社ごとの課題に合わせたオーダーメイド型の解決策を提案し、「効率化」と「安心感」を同時に実現することを目指します。",
    "信頼を積み重ねながら革新を続け、人とテクノロジーが共に成長できる未来を描いていきます。",
];

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

fn current_scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64 ^ js_sys::Date::now() as u64
}

/// Tracks `window.scrollY`; the listener lives exactly as long as the caller.
#[hook]
fn use_scroll_y() -> f64 {
    let scroll_y = use_state(current_scroll_y);

    {
        let scroll_y = scroll_y.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn FnMut()>::new(move || {
                scroll_y.set(current_scroll_y());
            });
            let target = window();

            if let Some(target) = target.as_ref() {
                let _ = target
                    .add_event_listener_with_callback("scroll", listener.as_ref().unchecked_ref());
            }

            move || {
                if let Some(target) = target.as_ref() {
                    let _ = target.remove_event_listener_with_callback(
                        "scroll",
                        listener.as_ref().unchecked_ref(),
                    );
                }
                drop(listener);
            }
        });
    }

    *scroll_y
}

#[derive(Clone, PartialEq)]
struct FieldState {
    field: ParticleField,
    now_ms: f64,
}

impl Reducible for FieldState {
    type Action = f64;

    fn reduce(self: Rc<Self>, now_ms: f64) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        next.field.tick(now_ms);
        next.now_ms = now_ms;
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct ParticleBackgroundProps {
    config: ParticleConfig,
}

#[function_component(ParticleBackground)]
fn particle_background(props: &ParticleBackgroundProps) -> Html {
    let state = {
        let config = props.config.clone();
        use_reducer(move || FieldState {
            field: ParticleField::new(config, random_seed()),
            now_ms: 0.0,
        })
    };

    {
        let dispatcher = state.dispatcher();
        let tick_ms = props.config.tick_ms;
        use_effect_with((), move |_| {
            let started = js_sys::Date::now();
            let interval = Interval::new(tick_ms, move || {
                dispatcher.dispatch(js_sys::Date::now() - started);
            });
            move || drop(interval)
        });
    }

    html! {
        <div class="particle-field" aria-hidden="true">
            { for state.field.sprites(state.now_ms).map(|sprite| {
                let shape = match sprite.shape {
                    Shape::Circle => "particle--circle",
                    Shape::Square => "particle--square",
                };
                html! {
                    <div key={sprite.id} class={classes!("particle", shape)} style={sprite.style()} />
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TypewriterTextProps {
    text: AttrValue,
    #[prop_or(crate::typewriter::DEFAULT_DELAY_MS)]
    delay_ms: u32,
    #[prop_or_default]
    class: Classes,
}

#[function_component(TypewriterText)]
fn typewriter_text(props: &TypewriterTextProps) -> Html {
    let typewriter = {
        let text = props.text.to_string();
        let delay_ms = props.delay_ms;
        use_state(move || Typewriter::new(text, delay_ms))
    };

    {
        let typewriter = typewriter.clone();
        use_effect_with(props.text.clone(), move |text| {
            let mut next = (*typewriter).clone();
            if next.set_source(text) {
                typewriter.set(next);
            }
            || ()
        });
    }

    {
        let handle = typewriter.clone();
        let deps = (typewriter.source().to_string(), typewriter.revealed_count());
        use_effect_with(deps, move |_| {
            let pending = (!handle.is_done()).then(|| {
                let delay_ms = handle.delay_ms();
                let handle = handle.clone();
                Timeout::new(delay_ms, move || {
                    let mut next = (*handle).clone();
                    next.advance();
                    handle.set(next);
                })
            });
            move || drop(pending)
        });
    }

    html! {
        <span class={classes!("typewriter", props.class.clone())} aria-label={props.text.clone()}>
            <span aria-hidden="true">{typewriter.prefix().to_string()}</span>
            <span class="typewriter-caret" aria-hidden="true" />
        </span>
    }
}

fn sample_clock() -> Option<ClockSnapshot> {
    let now = js_sys::Date::new_0();
    ClockSnapshot::from_local_fields(
        i32::try_from(now.get_full_year()).ok()?,
        now.get_month() + 1,
        now.get_date(),
        now.get_hours(),
        now.get_minutes(),
        now.get_seconds(),
    )
}

#[function_component(ClockCard)]
fn clock_card() -> Html {
    // Stays `None` until the first tick so the first paint shows placeholders.
    let snapshot = use_state(|| None::<ClockSnapshot>);

    {
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let tick = move || snapshot.set(sample_clock());
            tick();

            let interval: Rc<RefCell<Option<Interval>>> = Rc::default();
            let aligned = {
                let interval = interval.clone();
                let tick = tick.clone();
                let millisecond = js_sys::Date::new_0().get_milliseconds();
                Timeout::new(clock::delay_to_next_second(millisecond), move || {
                    tick();
                    *interval.borrow_mut() = Some(Interval::new(clock::TICK_MS, tick));
                })
            };

            move || {
                drop(aligned);
                interval.borrow_mut().take();
            }
        });
    }

    html! {
        <div class="clock-card">
            <p class="clock-date">{clock::date_label(snapshot.as_ref())}</p>
            <p class="clock-time">{clock::time_label(snapshot.as_ref())}</p>
            <p class="clock-tagline">{"最新技術で常に進化"}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TechCardProps {
    glyph: AttrValue,
    title: AttrValue,
    description: AttrValue,
    index: usize,
}

#[function_component(TechCard)]
fn tech_card(props: &TechCardProps) -> Html {
    let hovered = use_state(|| false);

    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    html! {
        <div
            class={classes!("tech-card", hovered.then_some("is-hovered"))}
            style={format!("--reveal-delay: {:.1}s;", 0.1 * (props.index + 1) as f64)}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <div class="tech-card-icon" aria-hidden="true">{props.glyph.clone()}</div>
            <h3>{props.title.clone()}</h3>
            <p>{props.description.clone()}</p>
        </div>
    }
}

async fn post_inquiry(relay_url: &str, inquiry: &Inquiry) -> Result<(), SubmitError> {
    let response = Request::post(relay_url)
        .header("Accept", "application/json")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(inquiry.form_body())
        .map_err(|_| SubmitError::Network)?
        .send()
        .await
        .map_err(|_| SubmitError::Network)?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    interpret_reply(status, &body)
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    relay_url: AttrValue,
    delivery: ContactDelivery,
    log_level: LogLevel,
}

/// Posts straight to the relay unless background delivery is configured.
/// Even then, anything `Inquiry` cannot read is left to the native post.
#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let status = use_state(|| SubmitStatus::Idle);

    let onsubmit = (props.delivery == ContactDelivery::Fetch).then(|| {
        let status = status.clone();
        let relay_url = props.relay_url.clone();
        let log_level = props.log_level;
        Callback::from(move |event: SubmitEvent| {
            if status.is_sending() {
                event.prevent_default();
                return;
            }

            let Some(form) = event.target_dyn_into::<HtmlFormElement>() else {
                return;
            };
            let Ok(data) = FormData::new_with_form(&form) else {
                return;
            };

            let inquiry = match Inquiry::from_lookup(|name| data.get(name).as_string()) {
                Ok(inquiry) => inquiry,
                Err(error) => {
                    log_event(
                        log_level,
                        LogLevel::Debug,
                        "contact_submit_native_fallback",
                        json!({ "field": error.field(), "reason": error.as_str() }),
                    );
                    return;
                }
            };

            event.prevent_default();
            log_event(
                log_level,
                LogLevel::Info,
                "contact_submit_started",
                json!({ "category": inquiry.category.as_str() }),
            );
            status.set(SubmitStatus::Sending);

            let status = status.clone();
            let relay_url = relay_url.clone();
            spawn_local(async move {
                let next = match post_inquiry(&relay_url, &inquiry).await {
                    Ok(()) => {
                        form.reset();
                        SubmitStatus::Sent
                    }
                    Err(error) => {
                        let http_status = match error {
                            SubmitError::HttpStatus(code) => Some(code),
                            _ => None,
                        };
                        log_event(
                            log_level,
                            LogLevel::Info,
                            "contact_submit_failed",
                            json!({ "error_class": error.as_str(), "status": http_status }),
                        );
                        SubmitStatus::Failed(error)
                    }
                };

                log_event(
                    log_level,
                    LogLevel::Info,
                    "contact_submit_finished",
                    json!({ "outcome": next.as_str() }),
                );
                status.set(next);
            });
        })
    });

    html! {
        <form
            class="contact-form"
            action={props.relay_url.clone()}
            method="POST"
            onsubmit={onsubmit}
        >
            <input type="text" name="company" placeholder="会社名" required={true} />
            <input type="text" name="name" placeholder="ご担当者名" required={true} />
            <input type="email" name="email" placeholder="メールアドレス" required={true} />
            <input type="tel" name="phone" placeholder="電話番号（任意）" />
            <select name="category" required={true}>
                <option value="">{"相談区分を選択"}</option>
                { for Category::ALL.iter().map(|category| html! {
                    <option value={category.as_str()}>{category.as_str()}</option>
                }) }
            </select>
            <textarea name="message" placeholder="ご相談内容" required={true} />
            <label class="contact-consent">
                <input type="checkbox" name="privacy" required={true} />
                <span>{"プライバシーポリシーに同意します"}</span>
            </label>
            <button type="submit" disabled={status.is_sending()}>{"送信する"}</button>
            if let Some(message) = status.message() {
                <p class={classes!("contact-status", format!("is-{}", status.as_str()))} role="status">
                    {message}
                </p>
            }
        </form>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| SiteConfig::from_build_env());
    let reduced_motion = use_memo((), |_| prefers_reduced_motion());
    let desktop = use_memo((), |_| media_matches(DESKTOP_MEDIA_QUERY));
    let scroll_y = use_scroll_y();
    let styles = ScrollStyles::at(scroll_y, *desktop, *reduced_motion);

    {
        let log_level = config.log_level;
        let reduced_motion = *reduced_motion;
        let contact_delivery = config.contact_delivery;
        use_effect_with((), move |_| {
            log_event(
                log_level,
                LogLevel::Info,
                "app_mounted",
                json!({
                    "reduced_motion": reduced_motion,
                    "contact_delivery": contact_delivery.as_str(),
                }),
            );
            || ()
        });
    }

    let particle_config = match config.particle_count {
        Some(count) => ParticleConfig::hero().with_count(count),
        None => ParticleConfig::hero(),
    };

    html! {
        <>
            <div class="scroll-indicator" style={styles.indicator_style()} aria-hidden="true" />
            <header class="site-header">
                <p class="site-name">{"株式会社想樹"}</p>
                <nav aria-label="ページ内リンク">
                    <a href="#services">{"事業内容"}</a>
                    <a href="#contact">{"お問い合わせ"}</a>
                </nav>
            </header>

            <main class="page" style={styles.main_style()}>
                if !*reduced_motion {
                    <ParticleBackground config={particle_config} />
                }

                <section class="hero" style={styles.hero_style()}>
                    <div class="hero-copy">
                        <h1>
                            <TypewriterText text={HERO_HEADLINE} delay_ms={HERO_DELAY_MS} />
                        </h1>
                        <h2>{"変化を力に変える伴走者"}</h2>
                        <p>{"公共事業の確実性と生成AIによる効率化を両立し、信頼できる伴走パートナーとして企業・社会の生産性向上に貢献します。"}</p>
                        <div class="hero-actions">
                            <a class="button button--primary" href="#contact" aria-label="無料相談フォームへ（24時間以内に返信）">
                                {"無料相談（24時間以内に返信）"}
                            </a>
                            <a class="button button--ghost" href="#services" aria-label="サービス詳細へ">
                                {"サービス詳細"}
                            </a>
                        </div>
                    </div>
                    <ClockCard />
                </section>

                <section id="services" class="section-block" aria-labelledby="services-heading">
                    <h2 id="services-heading">{"事業内容"}</h2>
                    <p class="section-lead">{"信頼性・安定性・実績を重視し、お客様の成長をサポートする3つのサービスを提供しています"}</p>
                    <div class="service-grid">
                        { for SERVICES.iter().map(|service| html! {
                            <article class="service-card" key={service.title}>
                                <div class="service-icon" aria-hidden="true">{service.glyph}</div>
                                <h3>{service.title}</h3>
                                <p>{service.description}</p>
                                <ul>
                                    { for service.features.iter().map(|feature| html! { <li>{*feature}</li> }) }
                                </ul>
                                <a class="button button--primary" href="#contact">{"無料相談はこちら"}</a>
                            </article>
                        }) }
                    </div>
                </section>

                <section class="section-block" aria-labelledby="tech-heading">
                    <h2 id="tech-heading">{"技術力"}</h2>
                    <p class="section-lead">{"最新技術を駆使し、お客様のビジネスに革新的なソリューションを提供します"}</p>
                    <div class="tech-grid">
                        { for TECHNOLOGIES.iter().enumerate().map(|(index, (glyph, title, description))| html! {
                            <TechCard key={*title} glyph={*glyph} title={*title} description={*description} index={index} />
                        }) }
                    </div>
                </section>

                <section class="section-block outcomes" aria-labelledby="outcomes-heading">
                    <h2 id="outcomes-heading">{"期待できる効果"}</h2>
                    <p class="section-lead">{"お客様の課題解決に向けた具体的な成果"}</p>
                    <ul class="outcome-grid">
                        { for OUTCOMES.iter().map(|(title, detail)| html! {
                            <li key={*title}>
                                <h3>{*title}</h3>
                                <p>{*detail}</p>
                            </li>
                        }) }
                    </ul>
                </section>

                <section class="section-block message" aria-labelledby="message-heading">
                    <h2 id="message-heading">{"代表メッセージ"}</h2>
                    { for MESSAGE_PARAGRAPHS.iter().map(|paragraph| html! { <p>{*paragraph}</p> }) }
                    <h3>{"会社概要"}</h3>
                    <dl class="company-facts">
                        { for COMPANY_FACTS.iter().map(|(label, value)| html! {
                            <>
                                <dt>{*label}</dt>
                                <dd>{*value}</dd>
                            </>
                        }) }
                    </dl>
                </section>

                <section id="contact" class="section-block contact" aria-labelledby="contact-heading">
                    <h2 id="contact-heading">{"無料相談・お問い合わせ"}</h2>
                    <ContactForm
                        relay_url={config.contact_relay_url.clone()}
                        delivery={config.contact_delivery}
                        log_level={config.log_level}
                    />
                    <p class="muted">{"送信内容は info@souki-cp.co.jp にメールで届きます。"}</p>
                </section>
            </main>
        </>
    }
}

pub fn run() {
    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        web_sys::console::error_1(&"missing #app mount point".into());
        return;
    };

    yew::Renderer::<App>::with_root(root).render();
}
