use crate::grid::Heading;
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Steer(Heading),
    Pause,
    Restart,
}

const BOUND_KEYS: [VirtualKeyCode; 11] = [
    VirtualKeyCode::Escape,
    VirtualKeyCode::P,
    VirtualKeyCode::R,
    VirtualKeyCode::Up,
    VirtualKeyCode::W,
    VirtualKeyCode::Down,
    VirtualKeyCode::S,
    VirtualKeyCode::Left,
    VirtualKeyCode::A,
    VirtualKeyCode::Right,
    VirtualKeyCode::D,
];

pub fn command_for_key(key: VirtualKeyCode) -> Option<Command> {
    Some(match key {
        VirtualKeyCode::Escape => Command::Quit,
        VirtualKeyCode::P => Command::Pause,
        VirtualKeyCode::R => Command::Restart,
        VirtualKeyCode::Up | VirtualKeyCode::W => Command::Steer(Heading::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Command::Steer(Heading::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A => Command::Steer(Heading::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Command::Steer(Heading::Right),
        _ => return None,
    })
}

/// Drains this frame's key presses. A close request wins over everything.
pub fn poll(input: &WinitInputHelper) -> Vec<Command> {
    if input.close_requested() || input.destroyed() {
        return vec![Command::Quit];
    }
    BOUND_KEYS
        .iter()
        .filter(|&&key| input.key_pressed(key))
        .filter_map(|&key| command_for_key(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(command_for_key(VirtualKeyCode::Up), Some(Command::Steer(Heading::Up)));
        assert_eq!(command_for_key(VirtualKeyCode::A), Some(Command::Steer(Heading::Left)));
        assert_eq!(command_for_key(VirtualKeyCode::S), Some(Command::Steer(Heading::Down)));
        assert_eq!(command_for_key(VirtualKeyCode::Right), Some(Command::Steer(Heading::Right)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for_key(VirtualKeyCode::P), Some(Command::Pause));
        assert_eq!(command_for_key(VirtualKeyCode::R), Some(Command::Restart));
        assert_eq!(command_for_key(VirtualKeyCode::Escape), Some(Command::Quit));
        assert_eq!(command_for_key(VirtualKeyCode::Space), None);
    }

    #[test]
    fn every_bound_key_maps() {
        assert!(BOUND_KEYS.iter().all(|&k| command_for_key(k).is_some()));
    }

    #[test]
    fn idle_input_yields_nothing() {
        let input = WinitInputHelper::new();
        assert!(poll(&input).is_empty());
    }
}
