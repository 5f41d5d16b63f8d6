use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

mod asteroid;
mod audio;
mod collision;
mod formations;
mod gui;
mod particles;
mod render;
mod save;
mod session;
mod shake;
mod ship;
mod text;

use audio::SoundBank;
use collision::{BoundingCircle, BoundingRectangle, circle_intersects_rect};
use formations::TrialLayout;
use glam::Vec2;
use gui::{Menu, MessageBox};
use render::SpriteParams;
use save::{GameMode, SaveError, SaveManager};
use session::{GameEvent, GameOutcome, GameSession, SessionStatus};
use ship::{ShipInput, ShipTint};
use text::draw_text_centered;

const SCREEN_WIDTH: u32 = 1280;
const SCREEN_HEIGHT: u32 = 720;
const DT: f32 = 1.0 / 60.0;

/// Which screen owns input and rendering this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    MainMenu,
    Trials,
    Customize,
    Playing,
    Paused,
    Victory(GameOutcome),
}

/// Generic texture loading helper with consistent error reporting.
fn load_texture<'a>(
    texture_creator: &'a sdl2::render::TextureCreator<sdl2::video::WindowContext>,
    path: &str,
) -> Result<sdl2::render::Texture<'a>, String> {
    texture_creator
        .load_texture(path)
        .map_err(|e| format!("Failed to load {}: {}", path, e))
}

/// Reads the held-state controls the simulation consumes each tick.
fn build_ship_input(keyboard: &sdl2::keyboard::KeyboardState) -> ShipInput {
    ShipInput {
        turn_left: keyboard.is_scancode_pressed(Scancode::A),
        turn_right: keyboard.is_scancode_pressed(Scancode::D),
        thrust: keyboard.is_scancode_pressed(Scancode::W),
    }
}

fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Swatch rectangles for the customize screen, one per palette entry.
fn palette_swatches() -> Vec<BoundingRectangle> {
    let count = ShipTint::palette().len() as f32;
    let size = 64.0;
    let spacing = 40.0;
    let row_width = count * size + (count - 1.0) * spacing;
    let start_x = (SCREEN_WIDTH as f32 - row_width) / 2.0;

    (0..ShipTint::palette().len())
        .map(|i| BoundingRectangle::new(start_x + i as f32 * (size + spacing), 430.0, size, size))
        .collect()
}

fn main() -> Result<(), String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window("Meteor Mayhem", SCREEN_WIDTH, SCREEN_HEIGHT)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas
        .set_logical_size(SCREEN_WIDTH, SCREEN_HEIGHT)
        .map_err(|e| e.to_string())?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    // Sound is optional; a machine without an audio device still plays
    let sound_bank = match sdl_context.audio().and_then(|a| SoundBank::new(&a)) {
        Ok(bank) => Some(bank),
        Err(e) => {
            eprintln!("Audio unavailable, continuing without sound: {}", e);
            None
        }
    };

    let ship_texture = load_texture(&texture_creator, "assets/sprites/rocket_drill.png")?;
    let asteroid_texture = load_texture(&texture_creator, "assets/sprites/asteroid.png")?;
    let nebula_texture = load_texture(&texture_creator, "assets/backgrounds/nebula.png")?;

    let save_dir = dirs::home_dir()
        .map(|p| p.join(".meteor_mayhem/saves"))
        .unwrap_or_else(|| std::path::PathBuf::from("./saves"));
    let save_manager =
        SaveManager::new(&save_dir).map_err(|e| format!("Failed to create save manager: {}", e))?;

    let mut main_menu = Menu::new(
        "METEOR MAYHEM",
        vec![
            "NEW GAME".to_string(),
            "LOAD GAME".to_string(),
            "GALACTIC TRIALS".to_string(),
            "CUSTOMIZE SHIP".to_string(),
            "EXIT".to_string(),
        ],
    );

    let mut trials_menu = Menu::new("GALACTIC TRIALS", {
        let mut items: Vec<String> = TrialLayout::all()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        items.push("BACK".to_string());
        items
    });

    let mut pause_menu = Menu::new(
        "PAUSED",
        vec![
            "RESUME".to_string(),
            "SAVE GAME".to_string(),
            "QUIT TO TITLE".to_string(),
        ],
    );

    let swatches = palette_swatches();
    let mut selected_swatch: usize = 0;
    let mut ship_color = ShipTint::WHITE;

    let mut screen = Screen::MainMenu;
    let mut session: Option<GameSession> = None;
    let mut message: Option<MessageBox> = None;

    println!("Controls:");
    println!("A/D - Rotate ship");
    println!("W - Thrust");
    println!("ESC - Pause");

    'running: loop {
        for event in event_pump.poll_iter() {
            // A modal message eats all input until dismissed
            if message.is_some() {
                if let Event::KeyDown {
                    keycode: Some(Keycode::Return | Keycode::Space | Keycode::Escape),
                    ..
                } = event
                {
                    message = None;
                } else if matches!(event, Event::Quit { .. }) {
                    break 'running;
                }
                continue;
            }

            match (screen, &event) {
                (_, Event::Quit { .. }) => break 'running,

                // ---- Main menu ----
                (
                    Screen::MainMenu,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    },
                ) => match *key {
                    Keycode::Up => main_menu.select_previous(),
                    Keycode::Down => main_menu.select_next(),
                    Keycode::Return | Keycode::Space => match main_menu.selected_index() {
                        0 => {
                            session = Some(GameSession::new_regular(
                                SCREEN_WIDTH as f32,
                                SCREEN_HEIGHT as f32,
                                ship_color,
                            ));
                            screen = Screen::Playing;
                        }
                        1 => match save_manager.load_game() {
                            Ok(save_file) => {
                                // Built fully before the swap; a bad file
                                // never leaves a half-loaded session behind
                                session = Some(GameSession::from_snapshot(
                                    &save_file.state,
                                    SCREEN_WIDTH as f32,
                                    SCREEN_HEIGHT as f32,
                                ));
                                ship_color = save_file.state.ship_color;
                                screen = Screen::Playing;
                                println!("Loaded saved game");
                            }
                            Err(SaveError::NotFound) => {
                                message = Some(MessageBox::new("NO SAVED GAME FOUND"));
                            }
                            Err(SaveError::Corrupted(detail)) => {
                                eprintln!("Failed to load: {}", detail);
                                message =
                                    Some(MessageBox::new("SAVE FILE IS EMPTY OR CORRUPTED"));
                            }
                            Err(e) => {
                                eprintln!("Failed to load: {}", e);
                                message = Some(MessageBox::new("FAILED TO LOAD GAME"));
                            }
                        },
                        2 => {
                            trials_menu.reset_selection();
                            screen = Screen::Trials;
                        }
                        3 => screen = Screen::Customize,
                        _ => break 'running,
                    },
                    _ => {}
                },

                // ---- Trials menu ----
                (
                    Screen::Trials,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    },
                ) => match *key {
                    Keycode::Up => trials_menu.select_previous(),
                    Keycode::Down => trials_menu.select_next(),
                    Keycode::Escape => screen = Screen::MainMenu,
                    Keycode::Return | Keycode::Space => {
                        let layouts = TrialLayout::all();
                        let index = trials_menu.selected_index();
                        if index < layouts.len() {
                            session = Some(GameSession::new_trial(
                                layouts[index],
                                SCREEN_WIDTH as f32,
                                SCREEN_HEIGHT as f32,
                                ship_color,
                            ));
                            screen = Screen::Playing;
                        } else {
                            screen = Screen::MainMenu;
                        }
                    }
                    _ => {}
                },

                // ---- Customize ship ----
                (
                    Screen::Customize,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    },
                ) => match *key {
                    Keycode::Left => {
                        selected_swatch =
                            (selected_swatch + swatches.len() - 1) % swatches.len();
                    }
                    Keycode::Right => {
                        selected_swatch = (selected_swatch + 1) % swatches.len();
                    }
                    Keycode::Return | Keycode::Space => {
                        ship_color = ShipTint::palette()[selected_swatch].1;
                        message = Some(MessageBox::new("COLOR SAVED!"));
                        screen = Screen::MainMenu;
                    }
                    Keycode::Escape => screen = Screen::MainMenu,
                    _ => {}
                },
                (Screen::Customize, Event::MouseButtonDown { x, y, .. }) => {
                    // Point-sized circle against each swatch rectangle
                    let cursor = BoundingCircle::new(Vec2::new(*x as f32, *y as f32), 0.0);
                    for (i, swatch) in swatches.iter().enumerate() {
                        if circle_intersects_rect(&cursor, swatch) {
                            selected_swatch = i;
                        }
                    }
                }

                // ---- Gameplay ----
                (
                    Screen::Playing,
                    Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    },
                ) => {
                    pause_menu.reset_selection();
                    screen = Screen::Paused;
                }

                // ---- Pause menu ----
                (
                    Screen::Paused,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    },
                ) => match *key {
                    Keycode::Up => pause_menu.select_previous(),
                    Keycode::Down => pause_menu.select_next(),
                    Keycode::Escape => screen = Screen::Playing,
                    Keycode::Return | Keycode::Space => match pause_menu.selected_index() {
                        0 => screen = Screen::Playing,
                        1 => {
                            if let Some(active) = &session {
                                match save_manager.save_game(&active.save_state()) {
                                    Ok(path) => {
                                        println!("Game saved to: {}", path.display());
                                        message =
                                            Some(MessageBox::new("GAME SAVED SUCCESSFULLY!"));
                                    }
                                    Err(e) => {
                                        eprintln!("Failed to save: {}", e);
                                        message = Some(MessageBox::new("FAILED TO SAVE GAME"));
                                    }
                                }
                            }
                        }
                        _ => {
                            session = None;
                            main_menu.reset_selection();
                            screen = Screen::MainMenu;
                        }
                    },
                    _ => {}
                },

                // ---- Victory ----
                (
                    Screen::Victory(_),
                    Event::KeyDown {
                        keycode: Some(Keycode::Return | Keycode::Space | Keycode::Escape),
                        ..
                    },
                ) => {
                    session = None;
                    main_menu.reset_selection();
                    screen = Screen::MainMenu;
                }

                _ => {}
            }
        }

        // Advance the simulation only while actively playing
        if screen == Screen::Playing && message.is_none() {
            if let Some(active) = &mut session {
                let input = build_ship_input(&event_pump.keyboard_state());
                let status = active.update(DT, &input);

                for event in active.take_events() {
                    match event {
                        GameEvent::AsteroidDestroyed => {
                            if let Some(bank) = &sound_bank {
                                bank.play_rock_break();
                            }
                        }
                    }
                }

                if let SessionStatus::Complete(outcome) = status {
                    match outcome {
                        GameOutcome::TimeUp { destroyed } => {
                            println!("Time up! Asteroids destroyed: {}", destroyed)
                        }
                        GameOutcome::TrialCleared { elapsed } => {
                            println!("Trial cleared in {:.1}s", elapsed)
                        }
                    }
                    screen = Screen::Victory(outcome);
                }
            }
        }

        // ---- Render ----
        canvas.set_draw_color(Color::RGB(40, 0, 60));
        canvas.clear();

        match screen {
            Screen::MainMenu | Screen::Trials => {
                render::draw_background(
                    &mut canvas,
                    &nebula_texture,
                    SCREEN_WIDTH,
                    SCREEN_HEIGHT,
                    Vec2::ZERO,
                )?;
                if screen == Screen::MainMenu {
                    main_menu.render(&mut canvas)?;
                } else {
                    trials_menu.render(&mut canvas)?;
                }
            }

            Screen::Customize => {
                render::draw_background(
                    &mut canvas,
                    &nebula_texture,
                    SCREEN_WIDTH,
                    SCREEN_HEIGHT,
                    Vec2::ZERO,
                )?;
                draw_text_centered(
                    &mut canvas,
                    "CUSTOMIZE SHIP",
                    SCREEN_WIDTH as i32 / 2,
                    80,
                    Color::RGB(240, 220, 160),
                    3,
                )?;

                // Preview with the currently highlighted tint
                let preview_tint = ShipTint::palette()[selected_swatch].1;
                render::draw_sprite(
                    &mut canvas,
                    &ship_texture,
                    &SpriteParams {
                        position: Vec2::new(SCREEN_WIDTH as f32 / 2.0, 280.0),
                        source: render::FrameRect::new(0, 0, ship::FRAME_WIDTH, ship::FRAME_HEIGHT),
                        rotation: 0.0,
                        tint: (preview_tint.r, preview_tint.g, preview_tint.b),
                        origin: Vec2::new(
                            ship::FRAME_WIDTH as f32 / 2.0,
                            ship::FRAME_HEIGHT as f32 / 2.0,
                        ),
                        scale: 5.0,
                    },
                    Vec2::ZERO,
                )?;

                for (i, (swatch, (label, tint))) in
                    swatches.iter().zip(ShipTint::palette()).enumerate()
                {
                    let rect = Rect::new(
                        swatch.x as i32,
                        swatch.y as i32,
                        swatch.width as u32,
                        swatch.height as u32,
                    );
                    canvas.set_draw_color(Color::RGB(tint.r, tint.g, tint.b));
                    canvas.fill_rect(rect)?;

                    if i == selected_swatch {
                        canvas.set_draw_color(Color::RGB(255, 255, 255));
                        canvas.draw_rect(Rect::new(
                            rect.x - 4,
                            rect.y - 4,
                            rect.width() + 8,
                            rect.height() + 8,
                        ))?;
                        draw_text_centered(
                            &mut canvas,
                            label,
                            rect.x + rect.width() as i32 / 2,
                            rect.y + rect.height() as i32 + 16,
                            Color::RGB(255, 255, 255),
                            1,
                        )?;
                    }
                }

                draw_text_centered(
                    &mut canvas,
                    "ENTER TO SAVE - ESC TO CANCEL",
                    SCREEN_WIDTH as i32 / 2,
                    560,
                    Color::RGB(140, 140, 160),
                    1,
                )?;
            }

            Screen::Playing | Screen::Paused | Screen::Victory(_) => {
                if let Some(active) = &session {
                    let offset = active.shake_offset();

                    render::draw_background(
                        &mut canvas,
                        &nebula_texture,
                        SCREEN_WIDTH,
                        SCREEN_HEIGHT,
                        offset,
                    )?;

                    render::draw_sprite(
                        &mut canvas,
                        &ship_texture,
                        &active.ship().sprite_params(),
                        offset,
                    )?;

                    for asteroid in active.asteroids() {
                        if let Some(params) = asteroid.sprite_params() {
                            render::draw_sprite(&mut canvas, &asteroid_texture, &params, offset)?;
                        }
                    }

                    render::draw_particles(
                        &mut canvas,
                        active.emitter().borrow().particles(),
                        offset,
                    )?;

                    // HUD clock
                    let clock = match active.mode() {
                        GameMode::Regular => {
                            format!("TIME: {:02}", active.remaining_time().max(0.0) as u32)
                        }
                        GameMode::TimeTrial => {
                            format!("TIME: {}", format_clock(active.active_time()))
                        }
                    };
                    draw_text_centered(
                        &mut canvas,
                        &clock,
                        SCREEN_WIDTH as i32 / 2,
                        20,
                        Color::RGB(255, 255, 255),
                        2,
                    )?;
                }

                if screen == Screen::Paused {
                    pause_menu.render(&mut canvas)?;
                }

                if let Screen::Victory(outcome) = screen {
                    canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
                    canvas.set_draw_color(Color::RGBA(0, 0, 0, 200));
                    canvas.fill_rect(None)?;
                    canvas.set_blend_mode(sdl2::render::BlendMode::None);

                    let center_x = SCREEN_WIDTH as i32 / 2;
                    match outcome {
                        GameOutcome::TimeUp { destroyed } => {
                            draw_text_centered(
                                &mut canvas,
                                "TIME UP!",
                                center_x,
                                260,
                                Color::RGB(240, 220, 160),
                                4,
                            )?;
                            draw_text_centered(
                                &mut canvas,
                                &format!("ASTEROIDS DESTROYED: {}", destroyed),
                                center_x,
                                340,
                                Color::RGB(255, 255, 255),
                                2,
                            )?;
                        }
                        GameOutcome::TrialCleared { elapsed } => {
                            draw_text_centered(
                                &mut canvas,
                                "TRIAL CLEARED!",
                                center_x,
                                260,
                                Color::RGB(240, 220, 160),
                                4,
                            )?;
                            draw_text_centered(
                                &mut canvas,
                                &format!("TIME: {}", format_clock(elapsed)),
                                center_x,
                                340,
                                Color::RGB(255, 255, 255),
                                2,
                            )?;
                        }
                    }
                    draw_text_centered(
                        &mut canvas,
                        "PRESS ENTER",
                        center_x,
                        420,
                        Color::RGB(140, 140, 160),
                        1,
                    )?;
                }
            }
        }

        if let Some(active_message) = &message {
            active_message.render(&mut canvas)?;
        }

        canvas.present();

        // Cap framerate to ~60 FPS
        std::thread::sleep(std::time::Duration::new(0, 1_000_000_000u32 / 60));
    }

    Ok(())
}
