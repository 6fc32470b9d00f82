use tcfu::renderer::build_scene;
use tcfu::sim::Rules;
use tcfu::sprite::{ProceduralSprites, SpriteLoader};
use tcfu::{Flow, Key, Screen, Session};

/// Play a scripted game: hold right, fire every 10th tick
fn play(session: &mut Session, ticks: usize) {
    session.key_pressed(Key::RotateRight);
    for i in 0..ticks {
        if i % 10 == 0 {
            session.key_pressed(Key::Fire);
        }
        session.update();
    }
    session.key_released(Key::RotateRight);
}

#[test]
fn test_full_flow() {
    let sprites = ProceduralSprites.load().unwrap();
    let mut session = Session::new(Rules::default(), Some(2024));

    assert_eq!(session.key_pressed(Key::Instructions), Flow::Continue);
    assert_eq!(session.screen(), Screen::Instructions);
    session.key_pressed(Key::Back);
    session.key_pressed(Key::Confirm);
    assert_eq!(session.screen(), Screen::Playing);

    play(&mut session, 600);
    assert!(!build_scene(&session, &sprites).is_empty());

    let game = session.game().unwrap();
    if session.screen() == Screen::Playing {
        assert_eq!(game.time_ticks, 600);
    } else {
        assert_eq!(session.screen(), Screen::GameOver);
        assert_eq!(game.lives, 0);
    }

    // Abandon or finish, then leave from the menu/game-over screen
    if session.screen() == Screen::Playing {
        session.key_pressed(Key::Back);
        assert_eq!(session.screen(), Screen::StartMenu);
    }
    assert_eq!(session.key_pressed(Key::Back), Flow::Quit);
}

#[test]
fn test_fixed_seed_replays_identically() {
    let mut a = Session::new(Rules::default(), Some(7));
    let mut b = Session::new(Rules::default(), Some(7));
    for s in [&mut a, &mut b] {
        s.key_pressed(Key::Confirm);
        play(s, 900);
    }
    let (ga, gb) = (a.game().unwrap(), b.game().unwrap());
    assert_eq!(ga.seed, gb.seed);
    assert_eq!(ga.score, gb.score);
    assert_eq!(ga.lives, gb.lives);
    assert_eq!(ga.time_ticks, gb.time_ticks);
    assert_eq!(a.screen(), b.screen());
}
