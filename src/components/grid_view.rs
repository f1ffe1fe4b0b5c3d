use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

use super::{
    algorithm_panel::AlgorithmPanel, controls_panel::ControlsPanel, legend_panel::LegendPanel,
    status_line::StatusLine,
};
use crate::config::AppConfig;
use crate::model::GridModel;
use crate::render;
use crate::solver::{self, Algorithm, SolveRequest, SolveTracker};
use crate::state::{Advance, InputController, PlayerState, StepPlayer, ViewportGeometry};
use crate::util::{clog, speed_label};

type Shared<T> = Rc<RefCell<T>>;
type DrawFn = Rc<dyn Fn()>;

#[derive(Clone, Copy)]
enum AfterSolve {
    Play,
    Step,
}

/// Handles shared by button callbacks, canvas listeners, the playback
/// interval and in-flight solve requests.
#[derive(Clone)]
struct Session {
    grid: Shared<GridModel>,
    player: Shared<StepPlayer<Interval>>,
    tracker: Shared<SolveTracker>,
    draw_ref: Shared<Option<DrawFn>>,
    status: UseStateHandle<String>,
    progress: UseStateHandle<(usize, usize)>,
    solver_url: Rc<str>,
}

impl Session {
    fn paint(&self) {
        let draw = self.draw_ref.borrow().clone();
        if let Some(f) = draw {
            f();
        }
    }

    fn redraw(&self) {
        let cursor = self.player.borrow().cursor();
        self.show_cursor(cursor);
    }

    fn show_cursor(&self, cursor: usize) {
        self.paint();
        let total = self.player.borrow().len();
        self.progress.set((cursor, total));
    }

    fn set_status(&self, text: impl Into<String>) {
        self.status.set(text.into());
    }

    fn play(&self, speed: u32) {
        // The interval closure holds a clone of the session; the cycle ends
        // whenever the player releases the handle.
        let ticker = self.clone();
        let started = self
            .player
            .borrow_mut()
            .play(speed, move |ms| Interval::new(ms, move || ticker.on_tick()));
        if started {
            clog(&format!("playback started, {} ms per step", self.player.borrow().interval_ms()));
        } else if self.player.borrow().state() == PlayerState::Finished {
            self.set_status("Finished");
        }
    }

    fn on_tick(&self) {
        let outcome = self.player.borrow_mut().tick();
        match outcome {
            Advance::Moved { cursor } => self.show_cursor(cursor),
            Advance::Finished { released } => {
                self.redraw();
                self.set_status("Finished");
                if let Some(handle) = released {
                    // Still inside this interval's own callback: drop it afterwards.
                    spawn_local(async move { drop(handle) });
                }
            }
            Advance::Unchanged => {}
        }
    }

    fn step(&self) {
        let outcome = self.player.borrow_mut().step_once();
        match outcome {
            Advance::Moved { cursor } => self.show_cursor(cursor),
            Advance::Finished { released } => {
                drop(released);
                self.redraw();
                self.set_status("Finished");
            }
            Advance::Unchanged => {}
        }
    }

    fn pause(&self) {
        let was_playing = self.player.borrow().is_playing();
        self.player.borrow_mut().pause();
        if was_playing {
            self.set_status("Paused");
        }
    }

    fn reset(&self) {
        self.tracker.borrow_mut().invalidate();
        self.player.borrow_mut().reset();
        self.grid.borrow_mut().reset();
        self.set_status("Reset");
        self.redraw();
    }

    fn randomize(&self, probability: f64) {
        self.grid
            .borrow_mut()
            .randomize_walls(probability, js_sys::Math::random);
        clog(&format!("random walls: {} walls", self.grid.borrow().wall_count()));
        self.set_status("Random walls generated");
        self.redraw();
    }

    /// Sends the current grid to the solver. Only the newest request's
    /// response is loaded; older ones are dropped when they arrive.
    fn solve_then(&self, algorithm: Algorithm, speed: u32, after: AfterSolve) {
        let request = SolveRequest::snapshot(&self.grid.borrow(), algorithm);
        let ticket = self.tracker.borrow_mut().begin();
        self.set_status("Computing...");
        clog(&format!("solve requested: {}", algorithm.key()));
        let session = self.clone();
        spawn_local(async move {
            let result = solver::solve(&session.solver_url, &request).await;
            if !session.tracker.borrow().is_current(ticket) {
                clog("discarding stale solve response");
                return;
            }
            match result {
                Ok(trace) => {
                    let malformed = trace.malformed_count();
                    if malformed > 0 {
                        clog(&format!("{malformed} steps without a usable position will not be drawn"));
                    }
                    let total = trace.len();
                    session.player.borrow_mut().load(trace);
                    session.set_status(format!("Got {total} steps."));
                    session.redraw();
                    match after {
                        AfterSolve::Play => session.play(speed),
                        AfterSolve::Step => session.step(),
                    }
                }
                Err(err) => {
                    clog(&format!("solve failed: {err:?}"));
                    session.set_status(err.to_string());
                }
            }
        });
    }
}

fn canvas_offset(canvas: &HtmlCanvasElement, e: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

#[derive(Properties, PartialEq, Clone)]
pub struct GridViewProps {
    pub config: AppConfig,
}

#[function_component(GridView)]
pub fn grid_view(props: &GridViewProps) -> Html {
    let config = &props.config;
    let canvas_ref = use_node_ref();
    let grid = {
        let size = config.grid;
        use_mut_ref(move || {
            GridModel::new(size).unwrap_or_else(|err| {
                clog(&format!("{err}; using the default grid"));
                GridModel::default()
            })
        })
    };
    let player = use_mut_ref(StepPlayer::<Interval>::default);
    let input = use_mut_ref(InputController::default);
    let geometry = use_mut_ref(ViewportGeometry::default);
    let tracker = use_mut_ref(SolveTracker::default);
    let draw_ref = use_mut_ref(|| None::<DrawFn>);
    let status = use_state(|| String::from("Ready"));
    let progress = use_state_eq(|| (0usize, 0usize));
    let algorithm = use_state(|| config.default_algorithm);
    let speed = use_state(|| config.default_speed);

    let session = Session {
        grid: grid.clone(),
        player: player.clone(),
        tracker: tracker.clone(),
        draw_ref: draw_ref.clone(),
        status: status.clone(),
        progress: progress.clone(),
        solver_url: Rc::from(config.solver_url.as_str()),
    };

    // Mount: canvas sizing, draw closure, pointer listeners
    {
        let canvas_ref = canvas_ref.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");

            let apply_geometry = {
                let canvas = canvas.clone();
                let window = window.clone();
                let grid = grid.clone();
                let geometry = geometry.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    let cols = grid.borrow().size().cols;
                    let geo = ViewportGeometry::from_viewport(width, height, cols);
                    canvas.set_width(geo.canvas_side as u32);
                    canvas.set_height(geo.canvas_side as u32);
                    *geometry.borrow_mut() = geo;
                }
            };
            apply_geometry();

            let draw_closure: DrawFn = {
                let canvas = canvas.clone();
                let grid = grid.clone();
                let player = player.clone();
                let geometry = geometry.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    {
                        Some(c) => c,
                        None => return,
                    };
                    let ops = {
                        let grid = grid.borrow();
                        let player = player.borrow();
                        render::compose(&grid, player.trace(), player.cursor(), &geometry.borrow())
                    };
                    render::paint(&ctx, &ops);
                })
            };
            *draw_ref.borrow_mut() = Some(draw_closure);
            session.redraw();

            // Resize: geometry first, then repaint
            let resize_cb = {
                let session = session.clone();
                Closure::wrap(Box::new(move || {
                    apply_geometry();
                    session.redraw();
                }) as Box<dyn FnMut()>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            let mousedown_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                let geometry = geometry.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() != 0 {
                        return;
                    }
                    let (x, y) = canvas_offset(&canvas, &e);
                    let changed = input.borrow_mut().pointer_down(
                        &mut session.grid.borrow_mut(),
                        &geometry.borrow(),
                        x,
                        y,
                    );
                    if changed {
                        session.redraw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();

            let mousemove_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                let geometry = geometry.clone();
                let session = session.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if input.borrow().dragging().is_none() {
                        return;
                    }
                    let (x, y) = canvas_offset(&canvas, &e);
                    let changed = input.borrow_mut().pointer_move(
                        &mut session.grid.borrow_mut(),
                        &geometry.borrow(),
                        x,
                        y,
                    );
                    if changed {
                        session.redraw();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            // mouseup and mouseleave both end a drag
            let release_cb = {
                let input = input.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    input.borrow_mut().pointer_up();
                }) as Box<dyn FnMut(_)>)
            };
            for event in ["mouseup", "mouseleave"] {
                canvas
                    .add_event_listener_with_callback(event, release_cb.as_ref().unchecked_ref())
                    .ok();
            }

            move || {
                let _ = window
                    .remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                for event in ["mouseup", "mouseleave"] {
                    let _ = canvas
                        .remove_event_listener_with_callback(event, release_cb.as_ref().unchecked_ref());
                }
                session.tracker.borrow_mut().invalidate();
                session.player.borrow_mut().reset();
                session.draw_ref.borrow_mut().take();
                drop(resize_cb);
                drop(mousedown_cb);
                drop(mousemove_cb);
                drop(release_cb);
            }
        });
    }

    let on_start: Callback<()> = {
        let session = session.clone();
        let alg = *algorithm;
        let spd = *speed;
        Callback::from(move |()| session.solve_then(alg, spd, AfterSolve::Play))
    };
    let on_pause: Callback<()> = {
        let session = session.clone();
        Callback::from(move |()| session.pause())
    };
    let on_step: Callback<()> = {
        let session = session.clone();
        let alg = *algorithm;
        let spd = *speed;
        Callback::from(move |()| {
            let empty = session.player.borrow().trace().is_empty();
            if empty {
                session.solve_then(alg, spd, AfterSolve::Step);
            } else {
                session.step();
            }
        })
    };
    let on_reset: Callback<()> = {
        let session = session.clone();
        Callback::from(move |()| session.reset())
    };
    let on_random_walls: Callback<()> = {
        let session = session.clone();
        let probability = config.wall_probability;
        Callback::from(move |()| session.randomize(probability))
    };
    let on_speed: Callback<u32> = {
        let speed = speed.clone();
        let status = status.clone();
        Callback::from(move |v: u32| {
            speed.set(v);
            status.set(speed_label(v).to_string());
        })
    };
    let on_algorithm: Callback<Algorithm> = {
        let algorithm = algorithm.clone();
        Callback::from(move |a: Algorithm| algorithm.set(a))
    };

    let (cursor, total) = *progress;
    html! {<div style="display:flex; flex-direction:column; align-items:center; gap:12px; padding:16px; font-family:sans-serif; color:#24292f;">
        <h1 style="margin:0; font-size:22px;">{"Pathfinding Visualizer"}</h1>
        <ControlsPanel
            algorithm={*algorithm}
            speed={*speed}
            {on_algorithm}
            {on_speed}
            {on_start}
            {on_pause}
            {on_step}
            {on_reset}
            {on_random_walls}
        />
        <StatusLine text={(*status).clone()} {cursor} {total} />
        <canvas ref={canvas_ref} id="grid" style="display:block; cursor:pointer; touch-action:none;"></canvas>
        <div style="display:flex; flex-wrap:wrap; gap:12px; justify-content:center; max-width:720px;">
            <AlgorithmPanel algorithm={*algorithm} />
            <LegendPanel />
        </div>
    </div>}
}
