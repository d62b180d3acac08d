use coordinate_systems::Polar;
use linear_algebra::Vector2;
use modsim_diffeq::{
    CrossingDirection, ModelError, OdeModel, OdeState, StateVector, ZeroCrossingEvent,
};
use serde::{Deserialize, Serialize};

/// A baseball in planar flight with quadratic drag.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Baseball {
    /// Gravitational acceleration, m/s^2.
    pub g: f64,
    /// Mass, kg.
    pub mass: f64,
    /// Air density, kg/m^3.
    pub rho: f64,
    /// Drag coefficient.
    pub c_d: f64,
    /// Cross-sectional area, m^2.
    pub area: f64,
}

impl Default for Baseball {
    /// A regulation baseball in standard air.
    fn default() -> Self {
        Self {
            g: 9.8,
            mass: 0.145,
            rho: 1.2,
            c_d: 0.33,
            area: std::f64::consts::PI * 0.0365 * 0.0365,
        }
    }
}

/// Planar position and velocity of the ball.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl BallState {
    /// Launch from `(x, y)` with the given speed and elevation angle
    /// (radians above horizontal).
    pub fn launched(x: f64, y: f64, speed: f64, angle: f64) -> Self {
        let velocity = Vector2::from(Polar::new(speed, angle));
        Self {
            x,
            y,
            vx: velocity.x,
            vy: velocity.y,
        }
    }
}

impl OdeState for BallState {
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

impl Baseball {
    /// Drag force for the given velocity. Zero at rest, where the flight
    /// direction is undefined.
    fn drag_force(&self, velocity: Vector2) -> Vector2 {
        match velocity.unit() {
            Ok(direction) => {
                let speed = velocity.magnitude();
                direction * (-0.5 * self.rho * self.c_d * self.area * speed * speed)
            }
            Err(_) => Vector2::default(),
        }
    }
}

impl OdeModel for Baseball {
    type State = BallState;

    fn slope(
        &self,
        _t: f64,
        state: &Self::State,
        derivative: &mut Self::State,
    ) -> Result<(), ModelError> {
        let velocity = Vector2::new(state.vx, state.vy);
        let acceleration =
            Vector2::new(0.0, -self.g) + self.drag_force(velocity) / self.mass;
        derivative.x = state.vx;
        derivative.y = state.vy;
        derivative.vx = acceleration.x;
        derivative.vy = acceleration.y;
        Ok(())
    }
}

/// Terminal event: the ball comes back down to `y = 0`.
pub fn landing() -> ZeroCrossingEvent<BallState> {
    ZeroCrossingEvent::new(|_t, state: &BallState| state.y)
        .with_direction(CrossingDirection::Falling)
}
