//! Rigid-body world
//!
//! The demo only talks to physics through [`PhysicsWorld`]. [`World`] is a
//! small solver covering what a bouncing ball needs: dynamic circles against
//! static boxes with continuous collision, restitution, friction, damping
//! and gravity. Dynamic bodies do not collide with each other.

use glam::Vec2;

use super::body::{BodyDef, BodyHandle, RigidBody, Shape};
use super::collision::{
    Aabb, circle_aabb_gap, circle_aabb_overlap, reflect_velocity, sweep_circle_aabb,
};

/// A body starts touching anything within this distance (meters)
pub const CONTACT_SKIN: f32 = 0.1;
/// A live contact survives until the gap exceeds the skin plus this many
/// steps of travel
pub const CONTACT_PERSIST_STEPS: f32 = 4.0;
/// Maximum time-of-impact sub-steps per body per step
pub const MAX_TOI_ITERATIONS: usize = 8;

/// Physics engine seen by the demo loop
pub trait PhysicsWorld {
    fn create_body(&mut self, def: BodyDef) -> BodyHandle;
    /// Advance every body by `dt` seconds
    fn step(&mut self, dt: f32);
    fn body(&self, handle: BodyHandle) -> &RigidBody;
    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec2);
}

/// Static body as seen by a moving one
#[derive(Debug, Clone, Copy)]
struct StaticFixture {
    index: usize,
    aabb: Aabb,
    restitution: f32,
    friction: f32,
}

/// Bodies plus global forces
#[derive(Debug, Clone, Default)]
pub struct World {
    pub gravity: Vec2,
    bodies: Vec<RigidBody>,
    /// Live (dynamic, static) contact pairs
    contacts: Vec<(usize, usize)>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Move one dynamic body through `dt`, returning the static bodies it touched
    fn integrate(&mut self, index: usize, dt: f32, statics: &[StaticFixture]) -> Vec<usize> {
        let gravity = self.gravity;
        let body = &mut self.bodies[index];
        let mut touched = Vec::new();

        body.linear_velocity += gravity * dt;
        if body.linear_damping > 0.0 {
            body.linear_velocity *= 1.0 / (1.0 + dt * body.linear_damping);
        }

        let Shape::Circle { radius } = body.shape else {
            body.position += body.linear_velocity * dt;
            return touched;
        };

        let mut remaining = dt;
        for _ in 0..MAX_TOI_ITERATIONS {
            if remaining <= 0.0 {
                break;
            }
            let displacement = body.linear_velocity * remaining;
            let earliest = statics
                .iter()
                .filter_map(|fixture| {
                    sweep_circle_aabb(body.position, radius, displacement, &fixture.aabb)
                        .map(|hit| (fixture, hit))
                })
                .min_by(|a, b| a.1.toi.total_cmp(&b.1.toi));

            match earliest {
                None => {
                    body.position += displacement;
                    remaining = 0.0;
                }
                Some((fixture, hit)) => {
                    body.position += displacement * hit.toi;
                    let restitution = body.restitution.max(fixture.restitution);
                    let friction = (body.friction * fixture.friction).sqrt();
                    body.linear_velocity =
                        reflect_velocity(body.linear_velocity, hit.normal, restitution, friction);
                    remaining *= 1.0 - hit.toi;
                    if !touched.contains(&fixture.index) {
                        touched.push(fixture.index);
                    }
                }
            }
        }

        // Residual overlap (spawned inside, or out of sub-steps) and resting contacts
        for fixture in statics {
            let overlap = circle_aabb_overlap(body.position, radius, &fixture.aabb);
            if overlap.hit {
                body.position += overlap.normal * overlap.penetration;
                if body.linear_velocity.dot(overlap.normal) < 0.0 {
                    let restitution = body.restitution.max(fixture.restitution);
                    let friction = (body.friction * fixture.friction).sqrt();
                    body.linear_velocity = reflect_velocity(
                        body.linear_velocity,
                        overlap.normal,
                        restitution,
                        friction,
                    );
                }
            }
            let gap = circle_aabb_gap(body.position, radius, &fixture.aabb);
            if (overlap.hit || gap <= CONTACT_SKIN) && !touched.contains(&fixture.index) {
                touched.push(fixture.index);
            }
        }

        touched
    }

    /// Begin contacts for everything touched, end those that have separated
    ///
    /// A contact outlives the step that created it, so a caller sampling once
    /// after several steps still sees a bounce from the first of them.
    fn update_contacts(
        &mut self,
        index: usize,
        dt: f32,
        statics: &[StaticFixture],
        touched: &[usize],
    ) {
        let body = &self.bodies[index];
        let radius = body.shape.radius();
        let margin = CONTACT_SKIN + CONTACT_PERSIST_STEPS * body.linear_velocity.length() * dt;

        for fixture in statics {
            let pair = (index, fixture.index);
            let live = self.contacts.contains(&pair);
            if touched.contains(&fixture.index) {
                if !live {
                    self.contacts.push(pair);
                }
            } else if live && circle_aabb_gap(body.position, radius, &fixture.aabb) > margin {
                self.contacts.retain(|p| *p != pair);
            }
        }
    }
}

impl PhysicsWorld for World {
    fn create_body(&mut self, def: BodyDef) -> BodyHandle {
        self.bodies.push(RigidBody::from_def(&def));
        BodyHandle(self.bodies.len() - 1)
    }

    fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }

        let statics: Vec<StaticFixture> = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_dynamic())
            .map(|(index, b)| StaticFixture {
                index,
                aabb: b.aabb(),
                restitution: b.restitution,
                friction: b.friction,
            })
            .collect();

        for index in 0..self.bodies.len() {
            if !self.bodies[index].is_dynamic() {
                continue;
            }
            let touched = self.integrate(index, dt, &statics);
            self.update_contacts(index, dt, &statics, &touched);
        }

        for body in &mut self.bodies {
            body.contact_count = 0;
        }
        for &(a, b) in &self.contacts {
            self.bodies[a].contact_count += 1;
            self.bodies[b].contact_count += 1;
        }
    }

    fn body(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }

    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        self.bodies[handle.0].linear_velocity = velocity;
    }
}
