use snapix_macros::value_object;

#[value_object]
struct City(String);

#[value_object(debug = false)]
struct Secret(String);

#[value_object]
#[derive(Copy)]
enum Kind {
    Avatar,
    PostImage,
}

fn main() {
    let a = City("Minsk".into());
    let b = a.clone();
    assert_eq!(a, b);
    let _ = format!("{:?}", a);

    let _ = Secret("x".into());

    let k = Kind::Avatar;
    let copied = k;
    assert!(copied == Kind::Avatar);
    assert!(Kind::PostImage != k);
    let json = serde_json::to_string(&k).unwrap();
    assert_eq!(json, "\"Avatar\"");
}
