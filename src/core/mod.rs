/// Badge evaluation - unlock rules over a user's tracking history
pub mod badges;
/// Daily goal evaluation, selection, history and stats
pub mod goals;
/// Points and level progression shared by both evaluators
pub mod level;
/// Daily entry and journal persistence plus the post-save evaluation hooks
pub mod tracker;
