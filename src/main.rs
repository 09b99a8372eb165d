use rastrix::prelude::*;
use rastrix::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

const MOVE_STEP: f32 = 0.25;
const TURN_STEP: f32 = 3.0;
const SPIN_DEGREES_PER_SECOND: f32 = 30.0;

struct Viewer {
    settings: RenderSettings,
    spinning: bool,
}

impl Viewer {
    fn new(width: u32, height: u32) -> Self {
        let mut settings = RenderSettings {
            width,
            height,
            base_color: Color::rgb(180, 180, 190),
            mode: ShadingMode::Phong,
            light: Light::directional(Vec3::new(0.3, 0.5, 1.0)),
            ..RenderSettings::default()
        };
        settings.camera.set_position(Vec3::new(0.0, 0.0, 5.0));
        Self {
            settings,
            spinning: true,
        }
    }

    fn handle_key(&mut self, key: Key) {
        let camera = &mut self.settings.camera;
        let (yaw, pitch, roll) = camera.rotation();
        match key {
            Key::CycleShading => {
                self.settings.mode = match self.settings.mode {
                    ShadingMode::Wireframe => ShadingMode::Flat,
                    ShadingMode::Flat => ShadingMode::Phong,
                    ShadingMode::Phong => ShadingMode::Wireframe,
                };
                log::info!("shading mode: {}", self.settings.mode);
            }
            Key::MoveForward => self.step(Vec3::new(0.0, 0.0, -MOVE_STEP)),
            Key::MoveBackward => self.step(Vec3::new(0.0, 0.0, MOVE_STEP)),
            Key::MoveLeft => self.step(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
            Key::MoveRight => self.step(Vec3::new(MOVE_STEP, 0.0, 0.0)),
            Key::MoveUp => self.step(Vec3::new(0.0, MOVE_STEP, 0.0)),
            Key::MoveDown => self.step(Vec3::new(0.0, -MOVE_STEP, 0.0)),
            Key::YawLeft => {
                camera.set_rotation(yaw + TURN_STEP, pitch, roll);
            }
            Key::YawRight => {
                camera.set_rotation(yaw - TURN_STEP, pitch, roll);
            }
            Key::PitchUp => {
                camera.set_rotation(yaw, pitch + TURN_STEP, roll);
            }
            Key::PitchDown => {
                camera.set_rotation(yaw, pitch - TURN_STEP, roll);
            }
            Key::ToggleSpin => self.spinning = !self.spinning,
        }
    }

    fn step(&mut self, offset: Vec3) {
        let camera = &mut self.settings.camera;
        camera.set_position(camera.position() + offset);
    }

    fn update(&mut self, delta_ms: u64) {
        if self.spinning {
            let step = SPIN_DEGREES_PER_SECOND * delta_ms as f32 / 1000.0;
            self.settings.model.rotate(step, 0.0, 0.0);
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| "usage: rastrix <model.obj>".to_string())?;
    let mesh = rastrix::obj::load(&path).map_err(|e| e.to_string())?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path,
        mesh.positions().len(),
        mesh.faces().len()
    );

    let mut window = Window::new("Rastrix", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut viewer = Viewer::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut limiter = FrameLimiter::new(&window);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                viewer.settings.width = w;
                viewer.settings.height = h;
            }
            WindowEvent::Key(key) => viewer.handle_key(key),
            WindowEvent::None => {}
        }

        let delta = limiter.wait_and_get_delta(&window);
        viewer.update(delta);

        let frame = render(&mesh, &viewer.settings).map_err(|e| e.to_string())?;
        window.present(&frame.to_argb_bytes())?;
    }

    Ok(())
}
