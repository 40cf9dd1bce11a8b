pub const QUERY_GET_USER_APP_BY_EMAIL: &str = r#"
SELECT
    id,email,password_hash,auth_provider,is_enabled,created_at,updated_at
FROM user_app
WHERE email=$1;
"#;

pub const QUERY_GET_USER_APP_BY_ID: &str = r#"
SELECT
    id,email,password_hash,auth_provider,is_enabled,created_at,updated_at
FROM user_app
WHERE id=$1;
"#;

pub const QUERY_INSERT_USER_APP: &str = r#"
INSERT INTO user_app(
    email,password_hash,auth_provider,is_enabled,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_DELETE_USER_APP: &str = r#"DELETE FROM user_app WHERE id=$1;"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    user_app_id,pet_name,species,breed,age,weight,activity_level,avatar_url,
    nickname,feeding_schedule,training_goal,unit_preference,allergies,favorite_foods,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,$7,$8,
    $9,$10,$11,$12,$13,$14,
    $15,$16
);
"#;

pub const QUERY_GET_ALL_PETS_USER_ID: &str = r#"
SELECT
    id,user_app_id,pet_name,species,breed,age,weight,activity_level,avatar_url,
    nickname,feeding_schedule,training_goal,unit_preference,allergies,favorite_foods,
    created_at,updated_at
FROM pet
WHERE user_app_id=$1
ORDER BY created_at ASC, id ASC;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,user_app_id,pet_name,species,breed,age,weight,activity_level,avatar_url,
    nickname,feeding_schedule,training_goal,unit_preference,allergies,favorite_foods,
    created_at,updated_at
FROM pet
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_UPDATE_PET_PROFILE: &str = r#"
UPDATE pet SET
    pet_name=$3,breed=$4,age=$5,weight=$6,activity_level=$7,
    nickname=$8,feeding_schedule=$9,training_goal=$10,unit_preference=$11,
    allergies=$12,favorite_foods=$13,updated_at=$14,species=$15
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_UPDATE_PET_AVATAR: &str = r#"
UPDATE pet SET avatar_url=$3,updated_at=$4
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_INSERT_ACTIVITY_LOG: &str = r#"
INSERT INTO activity_log (
    pet_id,activity_type,duration_minutes,notes,created_at
) SELECT p.id,$3,$4,$5,$6
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id,pet_id,activity_type,duration_minutes,notes,created_at;
"#;

pub const QUERY_GET_ACTIVITY_LOGS: &str = r#"
SELECT al.id,al.pet_id,al.activity_type,al.duration_minutes,al.notes,al.created_at
FROM activity_log AS al
INNER JOIN pet AS p ON (p.id = al.pet_id)
WHERE al.pet_id=$1 AND p.user_app_id=$2
ORDER BY al.created_at DESC, al.id DESC;
"#;

pub const QUERY_INSERT_FEEDING_LOG: &str = r#"
INSERT INTO feeding_log (
    pet_id,food_type,quantity,notes,reaction,created_at
) SELECT p.id,$3,$4,$5,$6,$7
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id,pet_id,food_type,quantity,notes,reaction,created_at;
"#;

pub const QUERY_GET_FEEDING_LOGS: &str = r#"
SELECT fl.id,fl.pet_id,fl.food_type,fl.quantity,fl.notes,fl.reaction,fl.created_at
FROM feeding_log AS fl
INNER JOIN pet AS p ON (p.id = fl.pet_id)
WHERE fl.pet_id=$1 AND p.user_app_id=$2
ORDER BY fl.created_at DESC, fl.id DESC;
"#;

pub const QUERY_INSERT_HEALTH_LOG: &str = r#"
INSERT INTO health_log (
    pet_id,log_type,title,notes,value,logged_at,created_at,updated_at
) SELECT p.id,$3,$4,$5,$6,$7,$8,$8
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id,pet_id,log_type,title,notes,value,logged_at,created_at,updated_at;
"#;

pub const QUERY_GET_HEALTH_LOGS: &str = r#"
SELECT hl.id,hl.pet_id,hl.log_type,hl.title,hl.notes,hl.value,hl.logged_at,hl.created_at,hl.updated_at
FROM health_log AS hl
INNER JOIN pet AS p ON (p.id = hl.pet_id)
WHERE hl.pet_id=$1 AND p.user_app_id=$2
ORDER BY hl.logged_at DESC, hl.id DESC;
"#;

pub const QUERY_GET_HEALTH_LOG: &str = r#"
SELECT hl.id,hl.pet_id,hl.log_type,hl.title,hl.notes,hl.value,hl.logged_at,hl.created_at,hl.updated_at
FROM health_log AS hl
INNER JOIN pet AS p ON (p.id = hl.pet_id)
WHERE hl.pet_id=$1 AND p.user_app_id=$2 AND hl.id=$3;
"#;

pub const QUERY_UPDATE_HEALTH_LOG: &str = r#"
UPDATE health_log SET
    log_type=$4,title=$5,notes=$6,value=$7,logged_at=$8,updated_at=$9
WHERE id=$3 AND pet_id IN (SELECT id FROM pet WHERE id=$1 AND user_app_id=$2)
RETURNING id,pet_id,log_type,title,notes,value,logged_at,created_at,updated_at;
"#;

pub const QUERY_DELETE_HEALTH_LOG: &str = r#"
DELETE FROM health_log
WHERE id=$3 AND pet_id IN (SELECT id FROM pet WHERE id=$1 AND user_app_id=$2);
"#;

pub const QUERY_INSERT_REMINDER: &str = r#"
INSERT INTO reminder (
    pet_id,reminder_type,name,due_date,notes,created_at,updated_at
) SELECT p.id,$3,$4,$5,$6,$7,$7
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id,pet_id,reminder_type,name,due_date,notes,created_at,updated_at;
"#;

pub const QUERY_GET_REMINDERS: &str = r#"
SELECT r.id,r.pet_id,r.reminder_type,r.name,r.due_date,r.notes,r.created_at,r.updated_at
FROM reminder AS r
INNER JOIN pet AS p ON (p.id = r.pet_id)
WHERE r.pet_id=$1 AND p.user_app_id=$2
ORDER BY r.due_date ASC, r.id ASC;
"#;

pub const QUERY_GET_REMINDER: &str = r#"
SELECT r.id,r.pet_id,r.reminder_type,r.name,r.due_date,r.notes,r.created_at,r.updated_at
FROM reminder AS r
INNER JOIN pet AS p ON (p.id = r.pet_id)
WHERE r.pet_id=$1 AND p.user_app_id=$2 AND r.id=$3;
"#;

pub const QUERY_UPDATE_REMINDER: &str = r#"
UPDATE reminder SET
    reminder_type=$4,name=$5,due_date=$6,notes=$7,updated_at=$8
WHERE id=$3 AND pet_id IN (SELECT id FROM pet WHERE id=$1 AND user_app_id=$2)
RETURNING id,pet_id,reminder_type,name,due_date,notes,created_at,updated_at;
"#;

pub const QUERY_DELETE_REMINDER: &str = r#"
DELETE FROM reminder
WHERE id=$3 AND pet_id IN (SELECT id FROM pet WHERE id=$1 AND user_app_id=$2);
"#;

pub const QUERY_INSERT_MEMORY: &str = r#"
INSERT INTO memory (
    pet_id,image_url,caption,ai_hint,created_at
) SELECT p.id,$3,$4,$5,$6
FROM pet AS p
WHERE p.id=$1 AND p.user_app_id=$2
RETURNING id,pet_id,image_url,caption,ai_hint,created_at;
"#;

pub const QUERY_GET_MEMORIES: &str = r#"
SELECT m.id,m.pet_id,m.image_url,m.caption,m.ai_hint,m.created_at
FROM memory AS m
INNER JOIN pet AS p ON (p.id = m.pet_id)
WHERE m.pet_id=$1 AND p.user_app_id=$2
ORDER BY m.created_at DESC, m.id DESC;
"#;
