use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_survival::compute::init_state;
use space_survival::config::GameConfig;
use space_survival::entities::EffectKind;
use space_survival::error::GameError;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.playfield.width, 500.0);
    assert_eq!(config.playfield.height, 600.0);
    assert_eq!(config.playfield.fps, 60);
    assert_eq!(config.obstacles.count, 8);
    assert_eq!(config.player.lives, 3);
    assert_eq!(config.player.hide_ms, 1000);
    assert_eq!(config.player.weapon_decay_ms, 5000);
    assert_eq!(config.power_ups.drop_chance, 0.1);
    assert_eq!(config.effects.frame_ms, 50);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        [playfield]
        width = 640.0

        [player]
        lives = 5
        "#,
    )
    .unwrap();
    assert_eq!(config.playfield.width, 640.0);
    assert_eq!(config.playfield.height, 600.0);
    assert_eq!(config.player.lives, 5);
    assert_eq!(config.player.max_health, 100);
    assert_eq!(config.obstacles, GameConfig::default().obstacles);
}

#[test]
fn empty_toml_is_the_default() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml_str("[playfield\nwidth = ").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

fn rejected(text: &str) -> GameError {
    GameConfig::from_toml_str(text).unwrap_err()
}

#[test]
fn bad_values_are_rejected() {
    assert!(matches!(
        rejected("[playfield]\nheight = -1.0"),
        GameError::InvalidPlayfield { .. }
    ));
    assert!(matches!(
        rejected("[playfield]\nfps = 0"),
        GameError::InvalidFrameRate
    ));
    assert!(matches!(
        rejected("[obstacles]\nsprite_sizes = []"),
        GameError::NoObstacleSprites
    ));
    assert!(matches!(
        rejected("[obstacles]\nsprite_sizes = [[400.0, 400.0]]"),
        GameError::ObstacleTooWide { .. }
    ));
    assert!(matches!(
        rejected("[power_ups]\ndrop_chance = 1.5"),
        GameError::InvalidDropChance(_)
    ));
    assert!(matches!(
        rejected("[effects]\nsmall_frames = 0"),
        GameError::EmptyEffect("small")
    ));
    assert!(matches!(
        rejected("[projectiles]\nwidth = 0.0"),
        GameError::InvalidSprite { what: "projectile", .. }
    ));
    assert!(matches!(
        rejected("[player]\nmax_health = 0"),
        GameError::InvalidHealth(0)
    ));
    assert!(matches!(
        rejected("[player]\nshield_heal = -150"),
        GameError::NegativeShieldHeal(-150)
    ));
    assert!(matches!(
        rejected("[player]\nlives = 0"),
        GameError::NoLives
    ));
    assert!(matches!(
        rejected("[obstacles]\nradius_factor = 0.0"),
        GameError::InvalidRadiusFactor(_)
    ));
    assert!(matches!(
        rejected("[obstacles]\nradius_factor = nan"),
        GameError::InvalidRadiusFactor(_)
    ));
    assert!(matches!(
        rejected("[player]\nspeed = -8.0"),
        GameError::InvalidSpeed { what: "player", .. }
    ));
    assert!(matches!(
        rejected("[projectiles]\nspeed = inf"),
        GameError::InvalidSpeed { what: "projectile", .. }
    ));
    assert!(matches!(
        rejected("[power_ups]\nspeed = 0.0"),
        GameError::InvalidSpeed { what: "power-up", .. }
    ));
}

#[test]
fn init_state_refuses_a_config_that_would_break_health_or_lives() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut config = GameConfig::default();
    config.player.lives = 0;
    config.player.max_health = 0;
    assert!(init_state(config, 0, &mut rng).is_err());

    let mut config = GameConfig::default();
    config.player.shield_heal = -150;
    assert!(matches!(
        init_state(config, 0, &mut rng),
        Err(GameError::NegativeShieldHeal(-150))
    ));
}

#[test]
fn load_reads_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[obstacles]\ncount = 12").unwrap();
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.obstacles.count, 12);
}

#[test]
fn missing_file_is_a_read_error() {
    let err = GameConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, GameError::ConfigRead { .. }));
}

#[test]
fn effect_tables_per_kind() {
    let effects = GameConfig::default().effects;
    assert_eq!(effects.size(EffectKind::Large), 75.0);
    assert_eq!(effects.size(EffectKind::Small), 30.0);
    assert_eq!(effects.frames(EffectKind::PlayerDeath), 9);
}
