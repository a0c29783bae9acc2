//! Bots wandering an ASCII map through the asynchronous path pipeline.
//!
//! Every tick each bot either polls its pending request, walks towards its
//! current target, or submits the next request. Nothing on the tick thread
//! waits on a search.
//!
//! Run: cargo run --bin bots

use std::thread;
use std::time::Duration;

use glam::Vec2;
use tilenav_core::{CellGeometry, DEFAULT_CELL_SIZE, Point};
use tilenav_jobs::{
    FindPathRequest, JobsConfig, PathData, PathJobs, PreparedPath, RandomRadiusRequest,
};
use tilenav_paths::{PathConfig, PathFinder};

const MAP: [&str; 12] = [
    "########################",
    "#..........#...........#",
    "#..####....#....####...#",
    "#..#.......#.......#...#",
    "#..#...#########...#...#",
    "#......#.......#.......#",
    "#......#...#...#.......#",
    "#..#...#...#...#...#...#",
    "#..#.......#.......#...#",
    "#..####....#....####...#",
    "#......................#",
    "########################",
];

const TICKS: usize = 400;
const TICK: Duration = Duration::from_millis(5);
const SPEED: f32 = 8.0;
const WANDER_RADIUS: f32 = 448.0;

fn map_size() -> (i32, i32) {
    (MAP[0].len() as i32, MAP.len() as i32)
}

fn is_floor(p: Point) -> bool {
    MAP[p.y as usize].as_bytes()[p.x as usize] == b'.'
}

struct Bot {
    glyph: char,
    pos: Vec2,
    target: Vec2,
    old_target: Vec2,
    goal: Option<Vec2>,
    prepared: PreparedPath,
    arrivals: usize,
    requests: usize,
}

impl Bot {
    fn new(glyph: char, pos: Vec2) -> Self {
        Self {
            glyph,
            pos,
            target: pos,
            old_target: pos,
            goal: None,
            prepared: PreparedPath::new(),
            arrivals: 0,
            requests: 0,
        }
    }

    fn tick(&mut self, jobs: &PathJobs, geom: &CellGeometry) {
        if self.prepared.is_pending() {
            self.poll();
            return;
        }

        if self.pos != self.target {
            self.step();
            return;
        }

        let arrived = self
            .goal
            .is_some_and(|goal| geom.world_to_cell(self.pos) == geom.world_to_cell(goal));
        if arrived {
            self.arrivals += 1;
            self.goal = None;
        }

        self.requests += 1;
        let handle = match self.goal {
            Some(goal) => jobs.submit_find_path(FindPathRequest::new(self.pos, goal)),
            None => jobs.submit_random_radius(RandomRadiusRequest::new(self.pos, WANDER_RADIUS)),
        };
        self.prepared.set_pending(handle);
    }

    fn poll(&mut self) {
        if self.prepared.try_consume(&mut self.target, &mut self.old_target) {
            // A sampled point becomes the goal; the bot still has to path
            // there, so it stays put for now.
            if let PathData::RandomPoint(p) = self.prepared.data() {
                self.goal = Some(*p);
                self.target = self.old_target;
            }
        } else if !self.prepared.is_pending() {
            // Nothing usable came back: pick a new goal next tick.
            self.goal = None;
        }
    }

    fn step(&mut self) {
        let delta = self.target - self.pos;
        if delta.length() <= SPEED {
            self.pos = self.target;
        } else {
            self.pos += delta.normalize() * SPEED;
        }
    }
}

fn render(bots: &[Bot], geom: &CellGeometry) {
    let (w, h) = map_size();
    for y in 0..h {
        let line: String = (0..w)
            .map(|x| {
                let p = Point::new(x, y);
                bots.iter()
                    .find(|b| geom.world_to_cell(b.pos) == p)
                    .map(|b| b.glyph)
                    .unwrap_or(if is_floor(p) { '.' } else { '#' })
            })
            .collect();
        println!("{line}");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (w, h) = map_size();
    let geom = CellGeometry::new(w, h, DEFAULT_CELL_SIZE);
    let config = PathConfig::default().with_seed(7);
    let finder = PathFinder::build(w, h, config, |pos| is_floor(geom.world_to_cell(pos)))?;
    println!(
        "map {w}x{h}, {} walkable cells",
        finder.grid().walkable_count()
    );

    let jobs = PathJobs::new(finder, JobsConfig::default())?;
    let mut bots: Vec<Bot> = ['a', 'b', 'c', 'd', 'e']
        .into_iter()
        .map(|glyph| {
            let spawn = jobs.with_finder(|f| f.random_waypoint());
            Bot::new(glyph, spawn)
        })
        .filter(|b| b.pos != Vec2::ZERO)
        .collect();
    if bots.is_empty() {
        return Err("no walkable cell to spawn on".into());
    }

    for tick in 0..TICKS {
        for bot in &mut bots {
            bot.tick(&jobs, &geom);
        }
        if tick % 100 == 0 {
            println!("tick {tick}");
            render(&bots, &geom);
        }
        thread::sleep(TICK);
    }

    println!("tick {TICKS}");
    render(&bots, &geom);
    for bot in &bots {
        println!(
            "{}: {} arrivals, {} requests, at {}",
            bot.glyph,
            bot.arrivals,
            bot.requests,
            geom.world_to_cell(bot.pos)
        );
    }
    jobs.shutdown();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
