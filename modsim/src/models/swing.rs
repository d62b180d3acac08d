use linear_algebra::Vector2;
use modsim_diffeq::{
    CrossingDirection, ModelError, OdeModel, OdeState, StateVector, ZeroCrossingEvent,
};
use serde::{Deserialize, Serialize};

/// A point mass swinging on an elastic cable.
///
/// The cable behaves as a one-sided spring: it pulls toward the anchor only
/// while stretched past its natural length, with damping applied along the
/// cable direction, and goes slack otherwise.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CableSwing {
    /// Gravitational acceleration, m/s^2.
    pub g: f64,
    /// Mass, kg.
    pub mass: f64,
    /// Natural cable length, m.
    pub cable_length: f64,
    /// Cable stiffness, N/m.
    pub stiffness: f64,
    /// Radial damping while taut, N*s/m.
    pub damping: f64,
    /// Anchor point of the cable.
    pub anchor: Vector2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SwingState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl SwingState {
    pub fn at_rest(position: Vector2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vector2 {
        Vector2::new(self.vx, self.vy)
    }
}

impl OdeState for SwingState {
    fn dim(&self) -> usize {
        4
    }

    fn write_vector(&self, out: &mut StateVector) {
        out.resize(4);
        out[0] = self.x;
        out[1] = self.y;
        out[2] = self.vx;
        out[3] = self.vy;
    }

    fn read_vector(&mut self, x: &StateVector) {
        self.x = x[0];
        self.y = x[1];
        self.vx = x[2];
        self.vy = x[3];
    }

    fn headers(&self) -> Vec<String> {
        ["x", "y", "vx", "vy"].map(String::from).to_vec()
    }
}

impl CableSwing {
    /// Net force on the mass at the given state.
    fn force(&self, state: &SwingState) -> Vector2 {
        let mut force = Vector2::new(0.0, -self.mass * self.g);
        let relative = state.position() - self.anchor;
        let r = relative.magnitude();
        if r > self.cable_length {
            // taut: the direction is well defined since r > 0
            if let Ok(direction) = relative.unit() {
                let stretch = r - self.cable_length;
                let radial_speed = state.velocity().dot(direction);
                force = force + direction * (-self.stiffness * stretch - self.damping * radial_speed);
            }
        }
        force
    }

    /// Angle of the mass from straight below the anchor, radians, positive
    /// toward +x.
    pub fn angle_from_vertical(&self, state: &SwingState) -> f64 {
        let relative = state.position() - self.anchor;
        relative.x.atan2(-relative.y)
    }
}

impl OdeModel for CableSwing {
    type State = SwingState;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        let acceleration = self.force(state) / self.mass;
        derivative.x = state.vx;
        derivative.y = state.vy;
        derivative.vx = acceleration.x;
        derivative.vy = acceleration.y;
        Ok(())
    }
}

/// Terminal event: release the cable when the swing angle rises through
/// `angle` (radians from straight down, positive toward +x).
pub fn release_at_angle(swing: &CableSwing, angle: f64) -> ZeroCrossingEvent<SwingState> {
    let anchor = swing.anchor;
    ZeroCrossingEvent::new(move |_t, state: &SwingState| {
        let relative = state.position() - anchor;
        relative.x.atan2(-relative.y) - angle
    })
    .with_direction(CrossingDirection::Rising)
}
