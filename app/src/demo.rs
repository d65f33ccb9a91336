//! A headless movement demo.
//!
//! Three shapes live in the world. The player cube and a drifting cube carry both a [`Face`] and a
//! [`Velocity`], so the movement system moves them every frame. A stationary bar has only a
//! [`Face`]: it is drawn but never moved.

use std::fmt;

use signet_engine::ecs::{Component, Entity, World};

/// Player speed in pixels per frame.
pub const PLAYER_SPEED: i32 = 2;

#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// Something that can be drawn.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub rect: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Press(Key),
    Release(Key),
}

/// A fixed sequence of inputs, each tagged with the frame it arrives on.
pub struct Script {
    events: Vec<(u64, Input)>,
}

impl Script {
    pub fn new(events: Vec<(u64, Input)>) -> Self {
        Self { events }
    }

    /// The inputs arriving on `frame`.
    pub fn inputs_at(&self, frame: u64) -> impl Iterator<Item = Input> + '_ {
        self.events
            .iter()
            .filter(move |(at, _)| *at == frame)
            .map(|(_, input)| *input)
    }
}

impl Default for Script {
    /// Walk right, then down, then diagonally up and left.
    fn default() -> Self {
        use Input::{Press, Release};
        Self::new(vec![
            (0, Press(Key::Right)),
            (40, Release(Key::Right)),
            (40, Press(Key::Down)),
            (70, Release(Key::Down)),
            (80, Press(Key::Left)),
            (90, Press(Key::Up)),
            (110, Release(Key::Left)),
            (110, Release(Key::Up)),
        ])
    }
}

/// One rendered frame: every drawable entity and where it is.
pub struct Frame {
    pub number: u64,
    pub faces: Vec<(Entity, Face)>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}:", self.number)?;
        for (entity, face) in &self.faces {
            let Rect { x, y, w, h } = face.rect;
            let Rgb { r, g, b } = face.color;
            write!(f, " [{entity} {w}x{h} @ ({x}, {y}) #{r:02x}{g:02x}{b:02x}]")?;
        }
        Ok(())
    }
}

pub struct Demo {
    world: World,
    player: Entity,
    frame: u64,
}

impl Demo {
    pub fn new() -> Self {
        let mut world = World::new();
        world.register_component::<Velocity>();
        world.register_component::<Face>();

        let player = spawn_cube(
            &mut world,
            Rect {
                x: 0,
                y: 0,
                w: 10,
                h: 10,
            },
            Rgb::RED,
            Velocity::default(),
        );
        spawn_cube(
            &mut world,
            Rect {
                x: 300,
                y: 100,
                w: 15,
                h: 10,
            },
            Rgb::GREEN,
            Velocity { x: -2, y: 0 },
        );

        // No velocity: drawn but never moved.
        let bar = world.create_entity();
        world.add_component(
            bar,
            Face {
                rect: Rect {
                    x: 200,
                    y: 200,
                    w: 50,
                    h: 10,
                },
                color: Rgb::WHITE,
            },
        );

        log::info!("demo ready: {} entities", world.entity_count());
        Self {
            world,
            player,
            frame: 0,
        }
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Apply a key event to the player's velocity.
    pub fn handle(&mut self, input: Input) {
        let velocity = self.world.get_component::<Velocity>(self.player);
        match input {
            Input::Press(Key::Up) => velocity.y = -PLAYER_SPEED,
            Input::Press(Key::Down) => velocity.y = PLAYER_SPEED,
            Input::Press(Key::Left) => velocity.x = -PLAYER_SPEED,
            Input::Press(Key::Right) => velocity.x = PLAYER_SPEED,
            Input::Release(Key::Up | Key::Down) => velocity.y = 0,
            Input::Release(Key::Left | Key::Right) => velocity.x = 0,
        }
        log::debug!("input {input:?}: player velocity {velocity:?}");
    }

    /// Move every entity with both a face and a velocity.
    pub fn update(&mut self) {
        for entity in self.world.query::<(Face, Velocity)>() {
            let velocity = *self.world.get_component::<Velocity>(entity);
            let face = self.world.get_component::<Face>(entity);
            face.rect.x += velocity.x;
            face.rect.y += velocity.y;
        }
        self.frame += 1;
    }

    /// Collect every drawable entity.
    pub fn render(&self) -> Frame {
        let faces = self
            .world
            .query::<Face>()
            .into_iter()
            .map(|entity| (entity, *self.world.get_component_ref::<Face>(entity)))
            .collect();
        Frame {
            number: self.frame,
            faces,
        }
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_cube(world: &mut World, rect: Rect, color: Rgb, velocity: Velocity) -> Entity {
    let entity = world.create_entity();
    world.add_component(entity, velocity);
    world.add_component(entity, Face { rect, color });
    entity
}
