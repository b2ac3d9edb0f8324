mod ball_ball_distance;
mod epa3;
mod failures;
mod simplex_reuse;
mod strategies;
