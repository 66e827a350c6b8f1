use crate::engine::{EngineServices, FrameStats, Game, GameConfig, InputManager, Renderer};
use sokol::{app as sapp, gfx as sg, glue as sglue};
use std::ffi::{self, CString};

pub struct App<T: Game> {
    game: T,
    config: GameConfig,
}

// State structure that will be passed through sokol callbacks
struct AppState<T: Game> {
    game: T,
    config: GameConfig,
    pass_action: sg::PassAction,
    renderer: Renderer,
    input: InputManager,
    frame_stats: FrameStats,
}

impl<T: Game> App<T> {
    pub fn new(game: T) -> Self {
        let config = game.config();
        Self { game, config }
    }

    /// Opens the window and blocks until it closes.
    pub fn run(self) {
        let mut pass_action = sg::PassAction::new();
        pass_action.colors[0] = sg::ColorAttachmentAction {
            load_action: sg::LoadAction::Clear,
            clear_value: self.config.background_color,
            ..Default::default()
        };

        // Interior NULs would truncate the title anyway
        let title = CString::new(self.config.window_title.replace('\0', "")).unwrap_or_default();

        let config = self.config;
        let (width, height) = (config.window_width, config.window_height);

        let state = Box::new(AppState {
            game: self.game,
            config,
            pass_action,
            renderer: Renderer::new().with_logical_size(width as f32, height as f32),
            input: InputManager::new(),
            frame_stats: FrameStats::default(),
        });

        let user_data = Box::into_raw(state) as *mut ffi::c_void;

        sapp::run(&sapp::Desc {
            init_userdata_cb: Some(init::<T>),
            frame_userdata_cb: Some(frame::<T>),
            cleanup_userdata_cb: Some(cleanup::<T>),
            event_userdata_cb: Some(event::<T>),
            user_data,
            window_title: title.as_ptr(),
            width,
            height,
            sample_count: 1,
            high_dpi: false,
            swap_interval: 1,
            logger: sapp::Logger {
                func: Some(sokol::log::slog_func),
                ..Default::default()
            },
            icon: sapp::IconDesc {
                sokol_default: true,
                ..Default::default()
            },
            ..Default::default()
        });
    }
}

extern "C" fn init<T: Game>(user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };

    sg::setup(&sg::Desc {
        environment: sglue::environment(),
        logger: sg::Logger {
            func: Some(sokol::log::slog_func),
            ..Default::default()
        },
        ..Default::default()
    });

    crate::debug_print!("Using {:?} backend", sg::query_backend());

    state.renderer.init();

    let mut services = EngineServices {
        renderer: &mut state.renderer,
        frame_stats: &state.frame_stats,
    };

    state.game.init(&state.config, &mut services);
}

extern "C" fn frame<T: Game>(user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };
    let dt = sapp::frame_duration() as f32;
    state.frame_stats.update_frame_stats(dt);

    let mut services = EngineServices {
        renderer: &mut state.renderer,
        frame_stats: &state.frame_stats,
    };

    state.game.update(dt, &state.input, &mut services);

    sg::begin_pass(&sg::Pass {
        action: state.pass_action,
        swapchain: sglue::swapchain(),
        ..Default::default()
    });

    state.game.render(&mut services);
    state.renderer.flush();

    sg::end_pass();
    sg::commit();

    state.input.new_frame();

    if state.game.wants_quit() {
        sapp::request_quit();
    }
}

extern "C" fn cleanup<T: Game>(user_data: *mut ffi::c_void) {
    let mut state = unsafe { Box::from_raw(user_data as *mut AppState<T>) };
    state.game.shutdown();
    sg::shutdown();
}

extern "C" fn event<T: Game>(event: *const sapp::Event, user_data: *mut ffi::c_void) {
    let state = unsafe { &mut *(user_data as *mut AppState<T>) };
    let event = unsafe { &*event };

    process_input_events(state, event);
    state.game.handle_event(event);
}

fn process_input_events<T: Game>(state: &mut AppState<T>, event: &sapp::Event) {
    match event._type {
        sapp::EventType::KeyDown => state.input.handle_key_down(event.key_code),
        sapp::EventType::KeyUp => state.input.handle_key_up(event.key_code),
        sapp::EventType::MouseMove => state.input.handle_mouse_move(event.mouse_x, event.mouse_y),
        sapp::EventType::MouseDown => {
            state.input.handle_mouse_move(event.mouse_x, event.mouse_y);
            state.input.handle_mouse_button_down(event.mouse_button)
        }
        sapp::EventType::MouseUp => {
            state.input.handle_mouse_move(event.mouse_x, event.mouse_y);
            state.input.handle_mouse_button_up(event.mouse_button)
        }
        sapp::EventType::QuitRequested => state.input.handle_quit_requested(),
        _ => {}
    }
}
